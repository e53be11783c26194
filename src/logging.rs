// tracing setup. In the browser every formatted event becomes one console line;
// native builds (tests, tooling) write to stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Returns false if one was already installed.
///
/// An unparseable `filter` falls back to `info`.
pub fn init(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    #[cfg(target_arch = "wasm32")]
    let layer = layer.with_writer(console::ConsoleMakeWriter);
    #[cfg(not(target_arch = "wasm32"))]
    let layer = layer.with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    pub struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter { buffer: Vec::new() }
        }
    }

    /// Buffers one event and hands it to `console.log` when dropped.
    pub struct ConsoleWriter {
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buffer);
            let line = line.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&JsValue::from_str(line));
            }
        }
    }
}
