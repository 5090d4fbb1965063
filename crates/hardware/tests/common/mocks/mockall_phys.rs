use at91io_core::common::{PAGE_SIZE, PhysAddr};
use at91io_core::mem::{MappedPage, PhysMemory};
use mockall::mock;
use std::io;
use std::ptr::NonNull;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

mock! {
    pub Phys {}
    impl PhysMemory for Phys {
        type Page = FakePage;
        fn map_page(&mut self, page: PhysAddr) -> io::Result<FakePage>;
    }
}

/// A throwaway page whose explicit unmaps are counted in a shared counter.
#[derive(Debug)]
pub struct FakePage {
    words: Box<[AtomicU32]>,
    unmapped: Arc<AtomicUsize>,
}

impl FakePage {
    pub fn new(unmapped: &Arc<AtomicUsize>) -> Self {
        Self {
            words: (0..PAGE_SIZE / 4).map(|_| AtomicU32::new(0)).collect(),
            unmapped: Arc::clone(unmapped),
        }
    }
}

impl MappedPage for FakePage {
    fn as_ptr(&self) -> NonNull<u8> {
        NonNull::new(self.words.as_ptr() as *mut u8).unwrap()
    }

    fn unmap(self) -> io::Result<()> {
        let _ = self.unmapped.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
