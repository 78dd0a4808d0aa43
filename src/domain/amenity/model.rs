//! Amenity domain entity
//!
//! Amenities are shared tags (wifi, parking, sea view) linked to properties
//! and rooms. A deleted amenity keeps its links but no longer appears in
//! listings and cannot be linked again.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amenity {
    pub id: i32,
    pub name: String,
    /// Free-form grouping such as "GENERAL" or "BATHROOM"
    pub kind: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAmenity {
    pub name: String,
    pub kind: String,
}

/// Sorted, duplicate-free copy of a list of amenity ids.
pub fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_collapse() {
        assert_eq!(dedup_ids(&[4, 1, 4, 2, 1]), vec![1, 2, 4]);
        assert!(dedup_ids(&[]).is_empty());
    }
}
