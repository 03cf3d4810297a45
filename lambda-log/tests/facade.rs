use std::io;
use std::sync::{Arc, Mutex};

use lambda_log::{InvocationContext, LogConfigError, LoggerFactory, configure_logging};
use log::Log as _;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// The global logger can only be installed once per process, so this is the
// only test in this binary.
#[test]
fn installs_once_behind_log_macros() {
    let console = SharedBuffer::default();
    let context = InvocationContext::new().with_function_name("foo");
    let logger = LoggerFactory::new()
        .with_log_level(log::LevelFilter::Debug)
        .with_console(console.clone())
        .create(&context, None)
        .unwrap();
    configure_logging(logger).unwrap();

    log::debug!(user = "ann"; "signed in");
    log::trace!("too fine");
    log::logger().flush();

    let output = String::from_utf8(console.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1, "{output}");
    assert!(lines[0].ends_with(" signed in"), "{output}");

    let again = LoggerFactory::new().create(&context, None).unwrap();
    assert!(matches!(
        configure_logging(again),
        Err(LogConfigError::SetLogger { .. })
    ));
}
