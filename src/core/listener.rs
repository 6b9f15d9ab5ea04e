//! Background listeners that drain a subscription channel into a callback

use super::message::LogMessage;
use crossbeam_channel::Receiver;
use std::any::Any;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Run `callback` for every message on `receiver` until the channel closes
///
/// A panicking callback is reported and the listener keeps going.
pub(crate) fn spawn_thread<F>(
    subscription_id: &str,
    receiver: Receiver<LogMessage>,
    mut callback: F,
) -> io::Result<JoinHandle<()>>
where
    F: FnMut(LogMessage) + Send + 'static,
{
    let name = format!("log-listener-{}", subscription_id);
    let id = subscription_id.to_string();

    thread::Builder::new().name(name).spawn(move || {
        for message in receiver.iter() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(message))) {
                eprintln!(
                    "[LOGGER CRITICAL] Listener '{}' panicked: {}. Listener continues.",
                    id,
                    panic_message(payload.as_ref())
                );
            }
        }
    })
}

/// Await `callback` for every message on `receiver`, one at a time, on the
/// tokio runtime behind `handle`
///
/// The receiver is drained only as fast as callbacks complete, so a slow
/// callback leaves messages in the bounded subscription channel and the
/// sink drops once it is full.
#[cfg(feature = "async-listeners")]
pub(crate) fn spawn_async<F, Fut>(
    handle: &tokio::runtime::Handle,
    subscription_id: &str,
    receiver: Receiver<LogMessage>,
    callback: F,
) where
    F: Fn(LogMessage) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let runtime = handle.clone();
    let id = subscription_id.to_string();

    // crossbeam receivers block, keep them off the async workers
    handle.spawn_blocking(move || {
        for message in receiver.iter() {
            let outcome = catch_unwind(AssertUnwindSafe(|| runtime.block_on(callback(message))));
            if let Err(payload) = outcome {
                eprintln!(
                    "[LOGGER CRITICAL] Listener '{}' panicked: {}. Listener continues.",
                    id,
                    panic_message(payload.as_ref())
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogKind;
    use crossbeam_channel::bounded;
    use std::sync::mpsc;

    #[test]
    fn test_thread_runs_until_close() {
        let (tx, rx) = bounded(4);
        let (seen_tx, seen_rx) = mpsc::channel();

        let handle = spawn_thread("t1", rx, move |msg: LogMessage| {
            let _ = seen_tx.send(msg.message);
        })
        .unwrap();

        tx.send(LogMessage::new(LogKind::Info, "one", "")).unwrap();
        tx.send(LogMessage::new(LogKind::Info, "two", "")).unwrap();
        drop(tx);
        handle.join().unwrap();

        let seen: Vec<String> = seen_rx.try_iter().collect();
        assert_eq!(seen, vec!["one", "two"]);
    }

    #[test]
    fn test_thread_survives_panicking_callback() {
        let (tx, rx) = bounded(4);
        let (seen_tx, seen_rx) = mpsc::channel();

        let handle = spawn_thread("t2", rx, move |msg: LogMessage| {
            if msg.message == "bad" {
                panic!("callback failed");
            }
            let _ = seen_tx.send(msg.message);
        })
        .unwrap();

        tx.send(LogMessage::new(LogKind::Info, "bad", "")).unwrap();
        tx.send(LogMessage::new(LogKind::Info, "good", "")).unwrap();
        drop(tx);
        handle.join().unwrap();

        assert_eq!(seen_rx.try_iter().collect::<Vec<_>>(), vec!["good"]);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(payload.as_ref()), "static str");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(payload.as_ref()), "Unknown panic");
    }
}
