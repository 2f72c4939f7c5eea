//! Code table derivation: the path from the root to each leaf, 0 for left and 1 for right.

use std::fmt::{Display, Formatter};

use log::trace;

use super::tree::{Node, NodeData};
use crate::SYMBOL_COUNT;

/// A variable length bit string, first bit first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if self is a proper or equal prefix of other.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl From<&str> for Code {
    /// Parse a string of '0' and '1'. Panics on any other character.
    fn from(s: &str) -> Self {
        Code {
            bits: s
                .chars()
                .map(|c| match c {
                    '0' => false,
                    '1' => true,
                    _ => panic!("{:?} is not a binary code", s),
                })
                .collect(),
        }
    }
}

/// Maps each symbol present in the tree to its code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walk the tree depth first and record the path to every leaf.
    pub fn from_tree(root: &Node) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        let mut path = Vec::new();
        coding_helper(root, &mut path, &mut codes);
        let table = CodeTable { codes };
        for (sym, code) in table.iter() {
            trace!("  {:>3}: {}", sym, code);
        }
        table
    }

    /// The code for a symbol, or None if the symbol never occurred.
    pub fn get(&self, symbol: u16) -> Option<&Code> {
        self.codes.get(symbol as usize).and_then(Option::as_ref)
    }

    /// All (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(sym, code)| code.as_ref().map(|code| (sym as u16, code)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if no code is a prefix of another code in the table.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

/// Recursively walk the tree, carrying the path so far. Depth is bounded by the alphabet size.
fn coding_helper(node: &Node, path: &mut Vec<bool>, codes: &mut [Option<Code>]) {
    match &node.node_data {
        NodeData::Leaf(sym) => {
            codes[*sym as usize] = Some(Code { bits: path.clone() });
        }
        NodeData::Kids(left, right) => {
            path.push(false);
            coding_helper(left, path, codes);
            path.pop();
            path.push(true);
            coding_helper(right, path, codes);
            path.pop();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::tree::make_tree_from_counts;
    use crate::tools::freq_count::freqs;
    use crate::PSEUDO_EOF;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::from_tree(&make_tree_from_counts(&freqs(data)).unwrap())
    }

    #[test]
    fn repeated_byte_codes() {
        let table = table_for(b"aaa");
        assert_eq!(table.get(PSEUDO_EOF), Some(&Code::from("0")));
        assert_eq!(table.get(97), Some(&Code::from("1")));
        assert_eq!(table.get(98), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty_input_has_empty_eof_code() {
        let table = table_for(b"");
        assert_eq!(table.len(), 1);
        assert!(table.get(PSEUDO_EOF).unwrap().is_empty());
    }

    #[test]
    fn tie_broken_codes() {
        let table = table_for(b"abcd");
        assert_eq!(table.get(b'c' as u16).unwrap().to_string(), "00");
        assert_eq!(table.get(b'd' as u16).unwrap().to_string(), "01");
        assert_eq!(table.get(PSEUDO_EOF).unwrap().to_string(), "10");
        assert_eq!(table.get(b'a' as u16).unwrap().to_string(), "110");
        assert_eq!(table.get(b'b' as u16).unwrap().to_string(), "111");
    }

    #[test]
    fn all_byte_values_are_prefix_free() {
        let data: Vec<u8> = (0..=255).collect();
        let table = table_for(&data);
        assert_eq!(table.len(), SYMBOL_COUNT);
        assert!(table.is_prefix_free());
        assert!(table.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn skewed_counts_are_prefix_free() {
        let mut data = Vec::new();
        let mut run = 1;
        for byte in b"abcdefghijklmnop" {
            data.extend(std::iter::repeat(*byte).take(run));
            run *= 2;
        }
        let table = table_for(&data);
        assert!(table.is_prefix_free());
        assert_eq!(table.get(b'p' as u16).unwrap().len(), 1);
    }

    #[test]
    fn prefix_check_spots_a_clash() {
        let a = Code::from("01");
        let b = Code::from("011");
        assert!(a.is_prefix_of(&b));
        assert!(!b.is_prefix_of(&a));
    }

    #[test]
    #[should_panic(expected = "not a binary code")]
    fn non_binary_code_string_panics() {
        let _ = Code::from("01x");
    }
}
