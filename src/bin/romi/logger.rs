// `log` backend on the USART2 console, shared with the panic handler
use core::cell::RefCell;
use core::fmt::Write;
use core::pin::Pin;
use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Log, Metadata, Record};
use panic_write::PanicHandler;
use stm32f4xx_hal::{pac::USART2, serial::Tx};

pub type Console = Pin<PanicHandler<Tx<USART2>>>;

struct SerialLogger {
    tx: Mutex<RefCell<Option<Console>>>,
}

static LOGGER: SerialLogger = SerialLogger {
    tx: Mutex::new(RefCell::new(None)),
};

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        interrupt::free(|cs| {
            if let Some(tx) = self.tx.borrow(cs).borrow_mut().as_mut() {
                let _ = writeln!(tx, "[{}] {}\r", record.level(), record.args());
            }
        });
    }

    fn flush(&self) {}
}

pub fn init(tx: Console, level: LevelFilter) {
    interrupt::free(|cs| {
        LOGGER.tx.borrow(cs).replace(Some(tx));
    });
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
