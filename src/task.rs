use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::{
    error::{SymrowError, SymrowResult},
    vocab::SymbolType,
};

/// Immutable description of one reordering task instance.
///
/// `initial_sequence` and `target_sequence` map slot index (left-to-right
/// position) to symbol index. Both are bijections on `0..num_symbols`, the
/// initial one always the identity, the target one guaranteed different.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TaskData {
    pub symbols: Vec<String>,
    pub symbol_type: SymbolType,
    pub initial_sequence: Vec<usize>,
    pub target_sequence: Vec<usize>,
    pub num_symbols: usize,
    pub use_labels: bool,
}

impl TaskData {
    pub fn validate(&self) -> SymrowResult<()> {
        let n = self.num_symbols;
        if !(3..=8).contains(&n) {
            return Err(SymrowError::validation("num_symbols must be in 3..=8"));
        }
        if self.symbols.len() != n {
            return Err(SymrowError::validation("symbols length != num_symbols"));
        }
        if self.initial_sequence.len() != n || self.target_sequence.len() != n {
            return Err(SymrowError::validation("sequence length != num_symbols"));
        }
        if !is_permutation(&self.initial_sequence) || !is_permutation(&self.target_sequence) {
            return Err(SymrowError::validation(
                "sequences must be permutations of 0..num_symbols",
            ));
        }
        if self.initial_sequence == self.target_sequence {
            return Err(SymrowError::validation(
                "target sequence must differ from initial sequence",
            ));
        }
        let mut seen = HashSet::new();
        for s in &self.symbols {
            if !seen.insert(s.as_str()) {
                return Err(SymrowError::validation(format!("duplicate symbol '{s}'")));
            }
        }
        Ok(())
    }

    /// Map each symbol index to the slot it occupies in the target state.
    pub fn symbol_to_target_slot(&self) -> Vec<usize> {
        let mut map = vec![0usize; self.target_sequence.len()];
        for (slot, &symbol_idx) in self.target_sequence.iter().enumerate() {
            map[symbol_idx] = slot;
        }
        map
    }
}

fn is_permutation(seq: &[usize]) -> bool {
    let mut sorted: Vec<usize> = seq.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, &v)| i == v)
}

/// Generate one task instance from the given random source.
///
/// Cardinality, symbol type, the concrete symbol subset, the target
/// permutation, and label visibility are all sampled here; nothing is taken
/// from configuration.
pub fn generate<R: Rng>(rng: &mut R) -> TaskData {
    let num_symbols = rng.gen_range(3..=8usize);

    let symbol_type = match rng.gen_range(0..5u8) {
        0 => SymbolType::Shapes,
        1 => SymbolType::Letters,
        2 => SymbolType::Numbers,
        3 => SymbolType::Colors,
        _ => SymbolType::Mixed,
    };

    let catalog = symbol_type.catalog();
    let count = num_symbols.min(catalog.len());
    let symbols: Vec<String> = rand::seq::index::sample(rng, catalog.len(), count)
        .into_iter()
        .map(|i| catalog[i].to_string())
        .collect();

    let initial_sequence: Vec<usize> = (0..num_symbols).collect();

    let mut target_sequence = initial_sequence.clone();
    let mut attempts = 0;
    while target_sequence == initial_sequence && attempts < 100 {
        target_sequence.shuffle(rng);
        attempts += 1;
    }
    force_difference(&initial_sequence, &mut target_sequence);

    let use_labels = rng.gen_bool(0.5);

    TaskData {
        symbols,
        symbol_type,
        initial_sequence,
        target_sequence,
        num_symbols,
        use_labels,
    }
}

/// Termination guarantee for the shuffle loop: if the target still equals the
/// initial permutation, swap the first two entries.
fn force_difference(initial: &[usize], target: &mut [usize]) {
    if *target == *initial && target.len() >= 2 {
        target.swap(0, 1);
    }
}
