use std::io::Write;

/// The process environment a command runs in.
pub trait Host: Send + Sync {
    /// Destination for reports and normal output.
    fn output(&mut self) -> impl Write;

    /// Destination for warnings and error messages.
    fn error(&mut self) -> impl Write;

    /// Terminate the process. Test hosts record the code instead.
    fn exit(&mut self, code: i32);
}

/// Host that captures output in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
