//! Shared sources for the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lazyq::sequence::LazySequence;
use lazyq::{Query, Value};

/// Cursor that counts how many elements have been pulled through it.
pub struct CountingCursor {
    values: Vec<Value>,
    pos: usize,
    pulls: Arc<AtomicUsize>,
}

impl LazySequence for CountingCursor {
    fn next(&mut self) -> Option<Value> {
        let item = self.values.get(self.pos).cloned()?;
        self.pos += 1;
        self.pulls.fetch_add(1, Ordering::SeqCst);
        Some(item)
    }
}

/// A query over `values` plus a counter of elements pulled across all of
/// its cursors.
pub fn counting_query<I, V>(values: I) -> (Query, Arc<AtomicUsize>)
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    let pulls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulls);
    let query = Query::new(move || CountingCursor {
        values: values.clone(),
        pos: 0,
        pulls: Arc::clone(&counter),
    });
    (query, pulls)
}

pub fn pulled(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

/// `n` signed values cycling through every signed width.
pub fn mixed_signed(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| match i % 4 {
            0 => Value::I8(i as i8),
            1 => Value::I16(i as i16),
            2 => Value::I32(i as i32),
            _ => Value::I64(i as i64),
        })
        .collect()
}

/// Formatted tracing output captured in memory.
#[cfg(feature = "tracing")]
pub mod captured {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` under a subscriber at `level` and return what it logged.
    pub fn events_at<F: FnOnce()>(level: tracing::Level, f: F) -> String {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(level)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }
}
