use std::io::BufRead;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::voice::{SpeechEvent, SpeechRecognizer, VoiceError};

/// Where the reader thread delivers lines.
#[derive(Default)]
struct Sink {
    events: Option<mpsc::UnboundedSender<SpeechEvent>>,
    exhausted: bool,
}

/// Treats each line of a text stream as a finalized utterance.
///
/// Stands in for a microphone when driving the assistant from a terminal or
/// a script. Reaching end of input ends the capture.
///
/// Lines are read on a dedicated OS thread. A blocking read cannot be
/// cancelled, so `stop` detaches the thread from the event stream instead;
/// the runtime never waits on it.
pub struct LineRecognizer<R> {
    reader: Option<R>,
    sink: Arc<Mutex<Sink>>,
}

impl<R> LineRecognizer<R>
where
    R: BufRead + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            sink: Arc::new(Mutex::new(Sink::default())),
        }
    }
}

impl LineRecognizer<std::io::BufReader<std::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(std::io::BufReader::new(std::io::stdin()))
    }
}

impl<R> SpeechRecognizer for LineRecognizer<R>
where
    R: BufRead + Send + 'static,
{
    fn start(&mut self, events: mpsc::UnboundedSender<SpeechEvent>) -> Result<(), VoiceError> {
        {
            let mut sink = self.sink.lock();
            if sink.exhausted {
                return Err(VoiceError::Unavailable {
                    reason: "line input closed".to_string(),
                });
            }
            sink.events = Some(events);
        }

        // The reader thread is started once and outlives stop/start cycles.
        let Some(reader) = self.reader.take() else {
            return Ok(());
        };
        let sink = self.sink.clone();
        let spawned = std::thread::Builder::new()
            .name("line-recognizer".to_string())
            .spawn(move || read_lines(reader, sink));

        if let Err(e) = spawned {
            let mut sink = self.sink.lock();
            sink.events = None;
            sink.exhausted = true;
            return Err(VoiceError::Unavailable {
                reason: e.to_string(),
            });
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.sink.lock().events = None;
    }
}

fn read_lines<R: BufRead>(mut reader: R, sink: Arc<Mutex<Sink>>) {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                // Lines read while stopped are dropped.
                if let Some(events) = &sink.lock().events {
                    let _ = events.send(SpeechEvent::final_result(line.as_str()));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Line input failed");
                if let Some(events) = &sink.lock().events {
                    let _ = events.send(SpeechEvent::Error {
                        code: e.kind().to_string(),
                    });
                }
                break;
            }
        }
    }

    let mut sink = sink.lock();
    sink.exhausted = true;
    sink.events = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::time::Duration;

    use crate::voice::VoiceSession;

    /// Input that blocks until data arrives or the writer goes away.
    struct OpenInput {
        chunks: std::sync::mpsc::Receiver<Vec<u8>>,
    }

    impl Read for OpenInput {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.chunks.recv() {
                Ok(chunk) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    Ok(n)
                }
                Err(_) => Ok(0),
            }
        }
    }

    fn open_input() -> (
        std::sync::mpsc::Sender<Vec<u8>>,
        std::io::BufReader<OpenInput>,
    ) {
        let (tx, rx) = std::sync::mpsc::channel();
        (tx, std::io::BufReader::new(OpenInput { chunks: rx }))
    }

    #[tokio::test]
    async fn emits_one_final_result_per_line() {
        let input: &[u8] = b"where is Paris\n\nzoom in on Paris\n";
        let mut recognizer = LineRecognizer::new(input);
        let (tx, mut rx) = mpsc::unbounded_channel();

        recognizer.start(tx).expect("start");

        assert_eq!(rx.recv().await, Some(SpeechEvent::final_result("where is Paris\n")));
        assert_eq!(rx.recv().await, Some(SpeechEvent::final_result("\n")));
        assert_eq!(rx.recv().await, Some(SpeechEvent::final_result("zoom in on Paris\n")));
        // End of input closes the stream.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn stop_ends_capture() {
        let (_writer, reader) = open_input();
        let mut recognizer = LineRecognizer::new(reader);
        let (tx, mut rx) = mpsc::unbounded_channel();

        recognizer.start(tx).expect("start");
        recognizer.stop();

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn restart_resumes_same_input() {
        let (writer, reader) = open_input();
        let mut recognizer = LineRecognizer::new(reader);

        let (tx, mut rx) = mpsc::unbounded_channel();
        recognizer.start(tx).expect("start");
        writer.send(b"where is Paris\n".to_vec()).expect("write");
        assert_eq!(rx.recv().await, Some(SpeechEvent::final_result("where is Paris\n")));
        recognizer.stop();

        let (tx, mut rx) = mpsc::unbounded_channel();
        recognizer.start(tx).expect("restart");
        writer.send(b"where is London\n".to_vec()).expect("write");
        assert_eq!(rx.recv().await, Some(SpeechEvent::final_result("where is London\n")));
    }

    #[tokio::test]
    async fn start_after_end_of_input_is_unavailable() {
        let input: &[u8] = b"";
        let mut recognizer = LineRecognizer::new(input);
        let (tx, mut rx) = mpsc::unbounded_channel();
        recognizer.start(tx).expect("start");
        assert_eq!(rx.recv().await, None);

        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(matches!(
            recognizer.start(tx),
            Err(VoiceError::Unavailable { .. })
        ));
    }

    /// Stopping capture on input that stays open must not keep the runtime
    /// alive once its owner is done.
    #[test]
    fn stopped_session_does_not_block_runtime_shutdown() {
        let (_writer, reader) = open_input();
        let (done_tx, done_rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(async {
                let (tx, _rx) = mpsc::channel(4);
                let mut session =
                    VoiceSession::new(Box::new(LineRecognizer::new(reader)), tx, true);
                session.start().expect("start");
                session.stop();
            });
            drop(runtime);
            let _ = done_tx.send(());
        });

        assert!(
            done_rx.recv_timeout(Duration::from_secs(2)).is_ok(),
            "runtime shutdown waited on the blocked reader"
        );
    }
}
