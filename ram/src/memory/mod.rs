//! Random access memory for nuPython variables
//!
//! The interpreter stores the value of every variable in a memory cell.
//! A cell's address is assigned the first time a variable is written and
//! never changes afterwards. Names are resolved through a memory map kept
//! in alphabetical order, so lookups are a binary search.
//!
//! Reads hand out owned copies and writes store owned duplicates: no string
//! payload is ever shared between memory and a caller.

mod dump;
mod map;
mod value;

pub use dump::{MapDump, MemoryDump, Snapshot, VarSnapshot};
pub use map::{MapEntry, MemoryMap};
pub use value::Value;

use crate::error::{RamError, Result};
use tracing::{debug, trace};

/// Number of cells available in a freshly created memory
pub const INITIAL_CAPACITY: usize = 4;

/// Memory unit: an array of cells plus the map from names to cells
#[derive(Debug, Clone)]
pub struct Ram {
    /// One value per allocated cell; `cells.len()` is the capacity
    cells: Vec<Value>,
    /// Sorted name index; `map.len()` is the number of variables
    map: MemoryMap,
}

impl Ram {
    /// Create an empty memory with [`INITIAL_CAPACITY`] cells, all `None`
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty memory with `capacity` cells (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Ram {
            cells: vec![Value::None; capacity],
            map: MemoryMap::with_capacity(capacity),
        }
    }

    /// Release the memory and every value it holds
    pub fn destroy(self) {
        debug!(
            size = self.size(),
            capacity = self.capacity(),
            "destroying memory"
        );
    }

    /// Number of variables currently stored
    pub fn size(&self) -> usize {
        self.map.len()
    }

    /// Number of cells currently allocated
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Address of the cell holding `name`, or `None` if it was never written
    pub fn get_addr(&self, name: &str) -> Option<usize> {
        self.map.find(name)
    }

    /// Copy of the value at `address`, or `None` unless `address < size`
    pub fn read_cell_by_addr(&self, address: usize) -> Option<Value> {
        if address < self.size() {
            Some(self.cells[address].clone())
        } else {
            None
        }
    }

    /// Copy of the value of `name`, or `None` if it was never written
    pub fn read_cell_by_name(&self, name: &str) -> Option<Value> {
        self.get_addr(name)
            .and_then(|address| self.read_cell_by_addr(address))
    }

    /// Overwrite the cell at `address` with a duplicate of `value`.
    ///
    /// Any address below the capacity is accepted, including cells no
    /// variable is mapped to yet. Returns `false` without touching memory
    /// when `address` is outside the capacity. Size and map are unchanged.
    pub fn write_cell_by_addr(&mut self, value: &Value, address: usize) -> bool {
        match self.cells.get_mut(address) {
            Some(cell) => {
                *cell = value.clone();
                true
            }
            None => false,
        }
    }

    /// Assign `value` to `name`.
    ///
    /// An existing variable is overwritten in place. A new variable gets the
    /// next free cell (the current size) and a map entry at its sorted
    /// position; memory doubles first if every cell is taken. Always
    /// succeeds.
    pub fn write_cell_by_name(&mut self, value: &Value, name: &str) -> bool {
        match self.map.search(name) {
            Ok(index) => {
                let address = self.map.entries()[index].cell;
                trace!(name, address, "overwriting variable");
                self.write_cell_by_addr(value, address)
            }
            Err(index) => {
                if self.size() == self.capacity() {
                    self.grow();
                }
                let address = self.size();
                trace!(name, address, index, "new variable");
                self.map.insert(index, name, address);
                self.write_cell_by_addr(value, address)
            }
        }
    }

    /// Double the capacity; new cells start out as `None`
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;
        debug!(old_capacity, new_capacity, "growing memory");
        self.cells.resize(new_capacity, Value::None);
        self.map.grow_to(new_capacity);
    }

    /// Copy of the value of `name`, as a `Result`
    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.read_cell_by_name(name).ok_or_else(|| RamError::NotFound {
            name: name.to_string(),
        })
    }

    /// Copy of the value a pointer refers to
    pub fn load(&self, ptr: i64) -> Result<Value> {
        usize::try_from(ptr)
            .ok()
            .and_then(|address| self.read_cell_by_addr(address))
            .ok_or(RamError::UnknownAddress { address: ptr })
    }

    /// Write through a pointer
    pub fn store(&mut self, value: &Value, ptr: i64) -> Result<()> {
        let written = usize::try_from(ptr)
            .map(|address| self.write_cell_by_addr(value, address))
            .unwrap_or(false);
        if written {
            Ok(())
        } else {
            Err(RamError::InvalidAddress {
                address: ptr,
                capacity: self.capacity(),
            })
        }
    }

    /// The memory map, in alphabetical order
    pub fn map(&self) -> &MemoryMap {
        &self.map
    }

    /// `(name, address, value)` for every variable, in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, &Value)> {
        self.map
            .iter()
            .map(move |entry| (entry.varname.as_str(), entry.cell, &self.cells[entry.cell]))
    }

    /// Printable view of the whole memory
    pub fn dump(&self) -> MemoryDump<'_> {
        MemoryDump::new(self)
    }

    /// Printable view of the memory map
    pub fn dump_map(&self) -> MapDump<'_> {
        MapDump::new(self)
    }

    /// Print the contents of memory to stdout, for debugging
    pub fn print(&self) {
        print!("{}", self.dump());
    }

    /// Print the memory map to stdout, for debugging
    pub fn print_map(&self) {
        print!("{}", self.dump_map());
    }

    /// Serializable view of the whole memory
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self)
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}
