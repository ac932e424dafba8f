#![allow(dead_code)]

use std::cell::RefCell;
use std::cmp::min;
use std::collections::VecDeque;
use std::io::{Error, ErrorKind};
use std::rc::Rc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::SeqCst;
use std::sync::{Arc, Condvar, Mutex, Weak};
use std::time::Duration;

use rftrx_proto::{ChannelConfig, IoChannel};

/// Scripted serial port: reads come from a fixed byte vector,
/// writes are captured.
pub struct SerialInterface {
    rx: Vec<u8>,
    rx_pos: usize,
    pub tx: Vec<u8>,
    do_read_error: bool,
    do_write_error: bool,
}

pub struct SerialIOPlane(Rc<RefCell<SerialInterface>>);

impl SerialIOPlane {
    pub fn new(serial_if: &Rc<RefCell<SerialInterface>>) -> SerialIOPlane {
        SerialIOPlane(serial_if.clone())
    }

    pub fn channel(serial_if: &Rc<RefCell<SerialInterface>>) -> IoChannel<SerialIOPlane> {
        IoChannel::open(Self::new(serial_if), ChannelConfig::default())
    }
}

impl SerialInterface {
    pub fn new(rx: &[u8]) -> Rc<RefCell<SerialInterface>> {
        Rc::new(RefCell::new(SerialInterface {
            rx: rx.to_vec(),
            tx: Vec::new(),
            rx_pos: 0,
            do_read_error: false,
            do_write_error: false,
        }))
    }

    /// Number of scripted bytes read so far.
    pub fn consumed(&self) -> usize {
        self.rx_pos
    }

    pub fn trigger_write_error(&mut self) {
        self.do_write_error = true;
    }

    pub fn trigger_read_error(&mut self) {
        self.do_read_error = true;
    }
}

impl std::io::Read for SerialIOPlane {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut inner = self.0.borrow_mut();
        if inner.do_read_error {
            inner.do_read_error = false;
            Err(Error::new(ErrorKind::PermissionDenied, "IO read error"))
        } else {
            // one byte at a time, like a UART data register
            let old_pos = inner.rx_pos;
            inner.rx_pos = min(old_pos + buf.len().min(1), inner.rx.len());
            let len = inner.rx_pos - old_pos;
            buf[..len].copy_from_slice(&inner.rx[old_pos..inner.rx_pos]);
            Ok(len)
        }
    }
}

impl std::io::Write for SerialIOPlane {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut inner = self.0.borrow_mut();
        if inner.do_write_error {
            inner.do_write_error = false;
            Err(Error::new(ErrorKind::PermissionDenied, "IO write error"))
        } else {
            inner.tx.extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

type RxT = Arc<Mutex<VecDeque<u8>>>;

/// Shared radio medium. Every byte written by a transmitter is delivered to
/// all receivers, after passing through the optional noise function.
#[derive(Default)]
pub struct RadioBus {
    receivers: Mutex<Vec<Weak<RadioLink>>>,
    data_available: Arc<Condvar>,
    noise: Mutex<Option<Box<dyn FnMut(u8) -> Vec<u8> + Send>>>,
    eof: AtomicBool,
}

impl RadioBus {
    pub fn new() -> Arc<RadioBus> {
        Default::default()
    }

    /// Replace each transmitted byte by the bytes returned from `noise`.
    pub fn set_noise(&self, noise: impl FnMut(u8) -> Vec<u8> + Send + 'static) {
        *self.noise.lock().unwrap() = Some(Box::new(noise));
    }

    pub fn disconnect(&self) {
        self.eof.store(true, SeqCst);
        self.data_available.notify_all();
    }

    pub fn new_transmitter(self: &Arc<Self>) -> RadioInterface {
        RadioInterface::new(Arc::clone(self), None)
    }

    pub fn new_receiver(self: &Arc<Self>) -> RadioInterface {
        let link = Arc::new(RadioLink {
            rx: Default::default(),
        });
        self.receivers.lock().unwrap().push(Arc::downgrade(&link));
        RadioInterface::new(Arc::clone(self), Some(link))
    }

    fn broadcast(&self, data: u8) {
        let bytes = match self.noise.lock().unwrap().as_mut() {
            Some(noise) => noise(data),
            None => vec![data],
        };
        let receivers = self.receivers.lock().unwrap();
        for weak in receivers.iter() {
            if let Some(receiver) = weak.upgrade() {
                receiver.rx.lock().unwrap().extend(bytes.iter().copied());
            }
        }
        self.data_available.notify_all();
    }
}

struct RadioLink {
    rx: RxT,
}

pub struct RadioInterface {
    bus: Arc<RadioBus>,
    link: Option<Arc<RadioLink>>,
    pub timeout: Duration,
}

impl RadioInterface {
    fn new(bus: Arc<RadioBus>, link: Option<Arc<RadioLink>>) -> RadioInterface {
        RadioInterface {
            bus,
            link,
            timeout: Duration::from_millis(100),
        }
    }
}

impl std::io::Read for RadioInterface {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            panic!("Testsuite called read with zero length buffer.")
        }
        let link = match &self.link {
            Some(link) => link,
            None => return Err(Error::new(ErrorKind::Unsupported, "transmit-only interface")),
        };

        let mut rx = link.rx.lock().expect("Read mutex is poisoned");
        if let Some(byte) = rx.pop_front() {
            buf[0] = byte;
            return Ok(1);
        }
        if self.bus.eof.load(SeqCst) {
            return Ok(0);
        }

        let mut rx = self
            .bus
            .data_available
            .wait_timeout(rx, self.timeout)
            .expect("Mutex lock failed")
            .0;
        if let Some(byte) = rx.pop_front() {
            buf[0] = byte;
            Ok(1)
        } else if self.bus.eof.load(SeqCst) {
            Ok(0)
        } else {
            Err(Error::new(ErrorKind::TimedOut, "IO read timeout"))
        }
    }
}

impl std::io::Write for RadioInterface {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        for byte in buf {
            self.bus.broadcast(*byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Simple xorshift generator, deterministic across runs.
pub struct Rng(u32);

impl Rng {
    pub fn new(seed: u32) -> Rng {
        Rng(seed.max(1))
    }

    pub fn next_u8(&mut self) -> u8 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 >> 24) as u8
    }
}
