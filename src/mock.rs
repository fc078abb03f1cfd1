// Stand-ins for the GPIO lines and the console, for tests.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin, StatefulOutputPin};

pub type Trace = Arc<Mutex<Vec<(usize, bool)>>>;
pub type Stamps = Arc<Mutex<Vec<Instant>>>;

// Plays back a fixed list of levels, then holds the last one.
pub struct ScriptedInput {
    levels: VecDeque<bool>,
    last: bool,
}

impl ScriptedInput {
    pub fn new(levels: &[bool]) -> Self {
        ScriptedInput {
            levels: levels.iter().copied().collect(),
            last: false,
        }
    }
}

impl ErrorType for ScriptedInput {
    type Error = Infallible;
}

impl InputPin for ScriptedInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if let Some(level) = self.levels.pop_front() {
            self.last = level;
        }
        Ok(self.last)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Debug)]
pub struct BrokenLine;

impl embedded_hal::digital::Error for BrokenLine {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct FailingInput;

impl ErrorType for FailingInput {
    type Error = BrokenLine;
}

impl InputPin for FailingInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(BrokenLine)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(BrokenLine)
    }
}

// Appends `(index, level)` to a trace shared between outputs on every write,
// and optionally the time of the write.
pub struct RecordingOutput {
    index: usize,
    level: bool,
    trace: Trace,
    stamps: Option<Stamps>,
}

impl RecordingOutput {
    pub fn new(index: usize) -> (Self, Trace) {
        let trace = Trace::default();
        (RecordingOutput::with_trace(index, &trace), trace)
    }

    pub fn with_trace(index: usize, trace: &Trace) -> Self {
        RecordingOutput {
            index,
            level: false,
            trace: Arc::clone(trace),
            stamps: None,
        }
    }

    pub fn stamp_into(&mut self, stamps: &Stamps) {
        self.stamps = Some(Arc::clone(stamps));
    }

    fn record(&mut self, level: bool) {
        self.level = level;
        self.trace.lock().unwrap().push((self.index, level));
        if let Some(stamps) = &self.stamps {
            stamps.lock().unwrap().push(Instant::now());
        }
    }
}

impl ErrorType for RecordingOutput {
    type Error = Infallible;
}

impl OutputPin for RecordingOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true);
        Ok(())
    }
}

impl StatefulOutputPin for RecordingOutput {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level)
    }
}

// A console that several blinkers can write into, one byte slice at a time.
#[derive(Clone, Default)]
pub struct SharedConsole(Arc<Mutex<Vec<u8>>>);

impl SharedConsole {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct ClosedConsole;

impl Write for ClosedConsole {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
