//! Fail-soft typed reads over a target address space

use super::ProcessMemory;
use crate::core::types::{Address, PilotError, PilotResult, ProcessArchitecture};

/// Fixed-size little-endian values that can be decoded from target memory
trait Primitive: Sized {
    const SIZE: usize;
    fn decode(bytes: &[u8]) -> Self;
}

macro_rules! impl_primitive {
    ($($ty:ty),*) => {
        $(
            impl Primitive for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_primitive!(u32, u64, i32, i64, f32);

/// Typed reader over a process's memory.
///
/// Every read returns a `PilotResult`; a failed OS read becomes
/// `PilotError::ReadFailed` and never panics, because target pages can be
/// transiently unreadable.
#[derive(Debug)]
pub struct MemoryClient<M> {
    memory: M,
    architecture: ProcessArchitecture,
}

impl<M: ProcessMemory> MemoryClient<M> {
    /// Create a client for a target with the given pointer width
    pub fn new(memory: M, architecture: ProcessArchitecture) -> Self {
        MemoryClient {
            memory,
            architecture,
        }
    }

    /// The underlying memory source
    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn architecture(&self) -> ProcessArchitecture {
        self.architecture
    }

    /// Read raw bytes from memory
    pub fn read_bytes(&self, address: Address, length: usize) -> PilotResult<Vec<u8>> {
        let mut buffer = vec![0u8; length];
        self.memory.read_memory(address, &mut buffer)?;
        Ok(buffer)
    }

    fn read_primitive<T: Primitive>(&self, address: Address) -> PilotResult<T> {
        let mut buffer = [0u8; 8];
        self.memory.read_memory(address, &mut buffer[..T::SIZE])?;
        Ok(T::decode(&buffer))
    }

    pub fn read_f32(&self, address: Address) -> PilotResult<f32> {
        self.read_primitive(address)
    }

    pub fn read_i32(&self, address: Address) -> PilotResult<i32> {
        self.read_primitive(address)
    }

    pub fn read_i64(&self, address: Address) -> PilotResult<i64> {
        self.read_primitive(address)
    }

    /// Read a one-byte boolean; any non-zero byte is `true`
    pub fn read_bool(&self, address: Address) -> PilotResult<bool> {
        let mut byte = [0u8; 1];
        self.memory.read_memory(address, &mut byte)?;
        Ok(byte[0] != 0)
    }

    /// Read a pointer-sized value for the target's architecture
    pub fn read_pointer(&self, address: Address) -> PilotResult<Address> {
        let value = match self.architecture {
            ProcessArchitecture::X86 => self.read_primitive::<u32>(address)? as usize,
            ProcessArchitecture::X64 => self.read_primitive::<u64>(address)? as usize,
        };
        Ok(Address::new(value))
    }

    /// Read a null-terminated string of at most `max_len` bytes.
    ///
    /// Invalid UTF-8 is dropped rather than rejected. A failed read yields an
    /// empty string.
    pub fn read_string(&self, address: Address, max_len: usize) -> String {
        match self.read_bytes(address, max_len) {
            Ok(buffer) => {
                let len = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
                String::from_utf8_lossy(&buffer[..len])
                    .chars()
                    .filter(|&c| c != char::REPLACEMENT_CHARACTER)
                    .collect()
            }
            Err(e) => {
                tracing::trace!("string read at {} failed: {}", address, e);
                String::new()
            }
        }
    }

    /// Follow a pointer chain: for each offset, read the pointer at the current
    /// address and add the offset to it.
    ///
    /// An empty chain resolves to `base`. Any failed or null intermediate read
    /// aborts the whole chain.
    pub fn resolve_pointer_chain(&self, base: Address, offsets: &[usize]) -> PilotResult<Address> {
        let mut current = base;
        for (level, &offset) in offsets.iter().enumerate() {
            let pointer = self
                .read_pointer(current)
                .map_err(|e| PilotError::pointer_chain_broken(level, e.to_string()))?;
            if pointer.is_null() {
                return Err(PilotError::pointer_chain_broken(
                    level,
                    format!("null pointer at {}", current),
                ));
            }
            current = pointer
                .checked_add(offset)
                .map_err(|e| PilotError::pointer_chain_broken(level, e.to_string()))?;
        }
        Ok(current)
    }
}
