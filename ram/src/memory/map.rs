//! Sorted name index mapping variable names to cell addresses

use std::slice;

/// One entry of the memory map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// Variable name
    pub varname: String,
    /// Memory cell assigned to the variable
    pub cell: usize,
}

/// Memory map kept in ascending order by variable name.
///
/// Names are unique. Entries are shifted on insert so the order holds after
/// every write; the cell an entry points at never changes.
#[derive(Debug, Clone, Default)]
pub struct MemoryMap {
    entries: Vec<MapEntry>,
}

impl MemoryMap {
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryMap {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of mapped variables
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binary search by name.
    ///
    /// `Ok(i)` is the index of the matching entry; `Err(i)` is the first
    /// index whose name is greater than `name`, where it would be inserted.
    pub fn search(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.varname.as_str().cmp(name))
    }

    /// Cell assigned to `name`, if mapped
    pub fn find(&self, name: &str) -> Option<usize> {
        self.search(name).ok().map(|i| self.entries[i].cell)
    }

    /// Insert a new entry at a position obtained from [`MemoryMap::search`],
    /// shifting every later entry one slot to the right.
    pub fn insert(&mut self, index: usize, varname: &str, cell: usize) {
        debug_assert!(self.search(varname) == Err(index));
        self.entries.insert(
            index,
            MapEntry {
                varname: varname.to_string(),
                cell,
            },
        );
    }

    /// Reserve backing storage for `capacity` entries in total.
    ///
    /// Allocation hint only; length and ordering are untouched.
    pub fn grow_to(&mut self, capacity: usize) {
        self.entries
            .reserve(capacity.saturating_sub(self.entries.len()));
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, MapEntry> {
        self.entries.iter()
    }

    /// Variable names in map order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.varname.as_str())
    }
}

impl<'a> IntoIterator for &'a MemoryMap {
    type Item = &'a MapEntry;
    type IntoIter = slice::Iter<'a, MapEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(names: &[&str]) -> MemoryMap {
        let mut map = MemoryMap::default();
        for (cell, name) in names.iter().enumerate() {
            let index = map.search(name).unwrap_err();
            map.insert(index, name, cell);
        }
        map
    }

    #[test]
    fn test_empty_map() {
        let map = MemoryMap::default();
        assert!(map.is_empty());
        assert_eq!(map.search("x"), Err(0));
        assert_eq!(map.find("x"), None);
    }

    #[test]
    fn test_insert_keeps_sorted_order() {
        let map = map_of(&["z", "b", "e", "a"]);
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["a", "b", "e", "z"]);
    }

    #[test]
    fn test_cells_follow_insertion_order() {
        let map = map_of(&["z", "b", "e", "a"]);
        assert_eq!(map.find("z"), Some(0));
        assert_eq!(map.find("b"), Some(1));
        assert_eq!(map.find("e"), Some(2));
        assert_eq!(map.find("a"), Some(3));
    }

    #[test]
    fn test_search_insertion_point() {
        let map = map_of(&["b", "d", "f"]);
        assert_eq!(map.search("a"), Err(0));
        assert_eq!(map.search("c"), Err(1));
        assert_eq!(map.search("e"), Err(2));
        assert_eq!(map.search("g"), Err(3));
        assert_eq!(map.search("d"), Ok(1));
    }

    #[test]
    fn test_empty_name_sorts_first() {
        let map = map_of(&["x", ""]);
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["", "x"]);
        assert_eq!(map.find(""), Some(1));
    }

    #[test]
    fn test_lexicographic_not_length_order() {
        let map = map_of(&["ab", "b", "aa", "a"]);
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["a", "aa", "ab", "b"]);
    }

    #[test]
    fn test_grow_to_keeps_entries() {
        let mut map = map_of(&["x", "y"]);
        map.grow_to(16);
        assert_eq!(map.len(), 2);
        assert_eq!(map.entries()[0].varname, "x");
        assert_eq!(map.entries()[1].cell, 1);
    }

    #[test]
    fn test_into_iterator() {
        let map = map_of(&["q", "p"]);
        let cells: Vec<_> = (&map).into_iter().map(|e| e.cell).collect();
        assert_eq!(cells, vec![1, 0]);
    }
}
