use serde::{Deserialize, Serialize};

// Number of frames the test runner emulates before sampling the result byte.
pub const RESULT_FRAMES: u32 = 60;
// Memory location blargg-style test ROMs report their status byte to.
pub const DEFAULT_OUTPUT_ADDR: &str = "0x00F0";

/// One expected status-byte value for a ROM, with the message the runner
/// reports when it observes that value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub code: u32,
    pub pass: bool,
    pub message: String,
}

impl ResultEntry {
    /// The implicit first entry of every section: status byte 1 means the
    /// ROM finished without errors.
    pub fn default_pass() -> Self {
        ResultEntry {
            code: 1,
            pass: true,
            message: String::from("Test passed"),
        }
    }

    pub fn failure(code: u32, message: &str) -> Self {
        ResultEntry {
            code,
            pass: false,
            message: String::from(message),
        }
    }
}

/// Expected outcome for a single test ROM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub rom: String,
    pub frames: u32,
    pub output: String,
    pub results: Vec<ResultEntry>,
}

impl TestRecord {
    /// A fresh record starts out expecting a plain pass.
    pub fn new(rom: String, output_addr: &str) -> Self {
        TestRecord {
            rom,
            frames: RESULT_FRAMES,
            output: String::from(output_addr),
            results: vec![ResultEntry::default_pass()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestManifest {
    pub tests: Vec<TestRecord>,
}
