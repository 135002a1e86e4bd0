//! Debug views of memory: text dumps and a serializable snapshot

use super::{Ram, Value};
use serde::Serialize;
use std::fmt;

/// Text dump of every variable, in alphabetical order
pub struct MemoryDump<'a> {
    memory: &'a Ram,
}

impl<'a> MemoryDump<'a> {
    pub(super) fn new(memory: &'a Ram) -> Self {
        MemoryDump { memory }
    }
}

impl fmt::Display for MemoryDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**MEMORY PRINT**")?;
        writeln!(f, "Size: {}", self.memory.size())?;
        writeln!(f, "Capacity: {}", self.memory.capacity())?;
        writeln!(f, "Contents:")?;
        for (name, _, value) in self.memory.iter() {
            writeln!(f, " {name}: {}, {value}", value.type_name())?;
        }
        writeln!(f, "**END PRINT**")
    }
}

/// Text dump of the memory map: `name: cell` pairs
pub struct MapDump<'a> {
    memory: &'a Ram,
}

impl<'a> MapDump<'a> {
    pub(super) fn new(memory: &'a Ram) -> Self {
        MapDump { memory }
    }
}

impl fmt::Display for MapDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**MEMORY MAP PRINT**")?;
        for entry in self.memory.map() {
            writeln!(f, " {}: {}", entry.varname, entry.cell)?;
        }
        writeln!(f, "**END PRINT**")
    }
}

/// Serializable view of memory
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub size: usize,
    pub capacity: usize,
    pub variables: Vec<VarSnapshot<'a>>,
}

/// One variable in a [`Snapshot`]
#[derive(Debug, Serialize)]
pub struct VarSnapshot<'a> {
    pub name: &'a str,
    pub address: usize,
    pub value: &'a Value,
}

impl<'a> Snapshot<'a> {
    pub(super) fn new(memory: &'a Ram) -> Self {
        Snapshot {
            size: memory.size(),
            capacity: memory.capacity(),
            variables: memory
                .iter()
                .map(|(name, address, value)| VarSnapshot {
                    name,
                    address,
                    value,
                })
                .collect(),
        }
    }
}
