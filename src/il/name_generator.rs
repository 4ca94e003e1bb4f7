use log::trace;

use super::Address;

/// Prefix shared by every generated temporary.
pub const TEMP_PREFIX: &str = "$t";

pub struct NameGenerator {
    index: usize,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Generates a new unique temporary name.
    pub fn next_temp(&mut self) -> Address {
        self.index += 1;
        let name = Address::new(format!("{}{:02}", TEMP_PREFIX, self.index));
        trace!("Allocated temporary {}", name);
        name
    }

    /// Forget every temporary handed out so far; numbering restarts at 1.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn next_temp_generates_ascending_temp_values() {
        let mut name_gen = NameGenerator::new();

        assert_eq!("$t01", name_gen.next_temp().to_string());
        assert_eq!("$t02", name_gen.next_temp().to_string());
    }

    #[test]
    fn seventh_temp_is_zero_padded() {
        let mut name_gen = NameGenerator::new();
        let seventh = (0..7).map(|_| name_gen.next_temp()).last().unwrap();

        assert_eq!("$t07", seventh.to_string());
    }

    #[test]
    fn temps_are_pairwise_distinct() {
        let mut name_gen = NameGenerator::new();
        let names: HashSet<_> = (0..99).map(|_| name_gen.next_temp().to_string()).collect();

        assert_eq!(99, names.len());
        assert!(names.contains("$t99"));
    }

    #[test]
    fn counter_grows_past_two_digits() {
        let mut name_gen = NameGenerator::new();
        let last = (0..100).map(|_| name_gen.next_temp()).last().unwrap();

        assert_eq!("$t100", last.to_string());
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut name_gen = NameGenerator::new();
        name_gen.next_temp();
        name_gen.next_temp();
        name_gen.reset();

        assert_eq!("$t01", name_gen.next_temp().to_string());
    }
}
