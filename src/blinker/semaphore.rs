/*
 * A set of 32 binary semaphores, one bit each, used to serialise access to
 * resources the blinkers share (for now only the console).
 *
 * Acquiring spins instead of sleeping. There is no fairness and no timeout: a
 * semaphore that is never released starves every waiter forever. Release does
 * not check ownership, releasing a free semaphore is allowed.
 */

use core::hint::spin_loop;
use core::sync::atomic::{AtomicU32, Ordering};

use enum_ordinalize::Ordinalize;

use crate::error::Error;

pub const SEMAPHORE_COUNT: u8 = 32;

// Well-known semaphore ids. The ordinal is the id.
#[derive(Ordinalize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Semaphores {
    Print,
}

impl Semaphores {
    pub fn id(self) -> u8 {
        self.ordinal()
    }
}

fn mask(id: u8) -> Result<u32, Error> {
    if id < SEMAPHORE_COUNT {
        Ok(1 << id)
    } else {
        Err(Error::InvalidSemaphore(id))
    }
}

#[derive(Debug, Default)]
pub struct SemaphoreSet {
    reserved: AtomicU32,
}

impl SemaphoreSet {
    pub const fn new() -> Self {
        SemaphoreSet {
            reserved: AtomicU32::new(0),
        }
    }

    /// Spins until semaphore `id` is free, then takes it.
    pub fn reserve(&self, id: u8) -> Result<(), Error> {
        let mask = mask(id)?;

        // Only attempt the read-modify-write once the bit looks free, so the
        // waiters don't keep bouncing the cache line between cores.
        while self.reserved.fetch_or(mask, Ordering::Acquire) & mask != 0 {
            while self.reserved.load(Ordering::Relaxed) & mask != 0 {
                spin_loop();
            }
        }
        Ok(())
    }

    /// Takes semaphore `id` if it is free. Returns whether it was taken.
    pub fn try_reserve(&self, id: u8) -> Result<bool, Error> {
        let mask = mask(id)?;
        Ok(self.reserved.fetch_or(mask, Ordering::Acquire) & mask == 0)
    }

    pub fn release(&self, id: u8) -> Result<(), Error> {
        let mask = mask(id)?;
        self.reserved.fetch_and(!mask, Ordering::Release);
        Ok(())
    }

    pub fn is_reserved(&self, id: u8) -> Result<bool, Error> {
        let mask = mask(id)?;
        Ok(self.reserved.load(Ordering::Acquire) & mask != 0)
    }

    pub fn bits(&self) -> u32 {
        self.reserved.load(Ordering::Acquire)
    }

    /// Reserves semaphore `id` until the returned guard is dropped.
    pub fn guard(&self, id: u8) -> Result<SemaphoreGuard<'_>, Error> {
        self.reserve(id)?;
        Ok(SemaphoreGuard { set: self, id })
    }
}

#[must_use = "the semaphore is released as soon as the guard is dropped"]
pub struct SemaphoreGuard<'a> {
    set: &'a SemaphoreSet,
    id: u8,
}

impl Drop for SemaphoreGuard<'_> {
    fn drop(&mut self) {
        // The id was validated when the guard was made.
        let _ = self.set.release(self.id);
    }
}
