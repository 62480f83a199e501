// Single-slot cells for passing the latest value between tasks.
//
// A cell has exactly one `Writer`, claimed once, and any number of
// `Reader`s. Values are overwritten in place; a reader sees whatever was
// written last. The slot is a single `AtomicU32`, so a read never sees a
// half-written value even when the writer preempts the reader.

use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

// A value that packs into 32 bits
pub trait ShareValue: Copy {
    fn to_bits(self) -> u32;
    fn from_bits(bits: u32) -> Self;
}

impl ShareValue for f32 {
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }
    fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }
}

pub struct Share<T> {
    bits: AtomicU32,
    claimed: AtomicBool,
    _value: PhantomData<fn() -> T>,
}

impl<T: ShareValue> Share<T> {
    // starts out holding T::from_bits(0)
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
            claimed: AtomicBool::new(false),
            _value: PhantomData,
        }
    }

    // the one writer for this cell; None if already handed out
    pub fn writer(&self) -> Option<Writer<'_, T>> {
        if self.claimed.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Writer { cell: self })
        }
    }

    pub fn reader(&self) -> Reader<'_, T> {
        Reader { cell: self }
    }
}

impl<T: ShareValue> Default for Share<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Writer<'a, T> {
    cell: &'a Share<T>,
}

impl<T: ShareValue> Writer<'_, T> {
    pub fn put(&mut self, value: T) {
        self.cell.bits.store(value.to_bits(), Ordering::Release);
    }
}

pub struct Reader<'a, T> {
    cell: &'a Share<T>,
}

impl<T> Clone for Reader<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Reader<'_, T> {}

impl<T: ShareValue> Reader<'_, T> {
    pub fn get(&self) -> T {
        T::from_bits(self.cell.bits.load(Ordering::Acquire))
    }
}
