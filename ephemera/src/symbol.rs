//! Symbols and the process-wide symbol registry.
//!
//! A symbol is a process-unique 64-bit id. Ids `1..=13` are reserved for the
//! well-known symbols, everything after that is handed out by an atomic
//! counter, so symbols minted on different agents or threads never collide.

use core::fmt;
use core::num::NonZeroU64;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

use hashbrown::HashMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(WellKnownSymbol::COUNT as u64);

static GLOBAL_SYMBOL_REGISTRY: LazyLock<GlobalSymbolRegistry> =
    LazyLock::new(GlobalSymbolRegistry::new);

/// A unique, unforgeable token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(NonZeroU64);

impl Symbol {
    // mints a symbol no other production will ever return
    pub(crate) fn fresh() -> Self {
        let raw = NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed);
        Self(NonZeroU64::MIN.saturating_add(raw))
    }

    pub const fn well_known(symbol: WellKnownSymbol) -> Self {
        Self(NonZeroU64::MIN.saturating_add(symbol as u64))
    }

    pub fn as_well_known(self) -> Option<WellKnownSymbol> {
        let index = usize::try_from(self.0.get() - 1).ok()?;
        WellKnownSymbol::ALL.get(index).copied()
    }

    pub fn id(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_well_known() {
            Some(well_known) => write!(f, "Symbol({})", well_known.description()),
            None => write!(f, "Symbol(#{})", self.0),
        }
    }
}

/// The engine-defined symbols that exist before any code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum WellKnownSymbol {
    AsyncIterator,
    HasInstance,
    IsConcatSpreadable,
    Iterator,
    Match,
    MatchAll,
    Replace,
    Search,
    Species,
    Split,
    ToPrimitive,
    ToStringTag,
    Unscopables,
}

impl WellKnownSymbol {
    pub const COUNT: usize = 13;

    pub const ALL: [Self; Self::COUNT] = [
        Self::AsyncIterator,
        Self::HasInstance,
        Self::IsConcatSpreadable,
        Self::Iterator,
        Self::Match,
        Self::MatchAll,
        Self::Replace,
        Self::Search,
        Self::Species,
        Self::Split,
        Self::ToPrimitive,
        Self::ToStringTag,
        Self::Unscopables,
    ];

    pub const fn description(self) -> &'static str {
        match self {
            Self::AsyncIterator => "Symbol.asyncIterator",
            Self::HasInstance => "Symbol.hasInstance",
            Self::IsConcatSpreadable => "Symbol.isConcatSpreadable",
            Self::Iterator => "Symbol.iterator",
            Self::Match => "Symbol.match",
            Self::MatchAll => "Symbol.matchAll",
            Self::Replace => "Symbol.replace",
            Self::Search => "Symbol.search",
            Self::Species => "Symbol.species",
            Self::Split => "Symbol.split",
            Self::ToPrimitive => "Symbol.toPrimitive",
            Self::ToStringTag => "Symbol.toStringTag",
            Self::Unscopables => "Symbol.unscopables",
        }
    }
}

#[derive(Default)]
struct RegistryTables {
    by_key: HashMap<Box<str>, Symbol, FxBuildHasher>,
    by_symbol: HashMap<Symbol, Box<str>, FxBuildHasher>,
}

/// The `Symbol.for` table.
///
/// Append-only and shared by every agent in the process. It is created on
/// first use and never torn down, so a registered symbol is the same entry
/// for the rest of the process and stays live forever.
pub struct GlobalSymbolRegistry {
    tables: RwLock<RegistryTables>,
}

impl GlobalSymbolRegistry {
    fn new() -> Self {
        Self {
            tables: RwLock::new(RegistryTables::default()),
        }
    }

    pub fn global() -> &'static Self {
        &GLOBAL_SYMBOL_REGISTRY
    }

    /// `Symbol.for(key)`: the registered symbol for `key`, registering a new
    /// one on first use.
    pub fn symbol_for(&self, key: &str) -> Symbol {
        if let Some(symbol) = self.tables.read().by_key.get(key) {
            return *symbol;
        }

        let mut tables = self.tables.write();
        // another agent may have registered the key between the two locks
        if let Some(symbol) = tables.by_key.get(key) {
            return *symbol;
        }
        let symbol = Symbol::fresh();
        tables.by_key.insert(Box::from(key), symbol);
        tables.by_symbol.insert(symbol, Box::from(key));
        tracing::trace!(symbol = symbol.id(), key, "registered global symbol");
        symbol
    }

    /// `Symbol.keyFor(symbol)`.
    pub fn key_for(&self, symbol: Symbol) -> Option<String> {
        self.tables
            .read()
            .by_symbol
            .get(&symbol)
            .map(|key| String::from(&**key))
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.tables.read().by_symbol.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.tables.read().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for GlobalSymbolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalSymbolRegistry")
            .field("len", &self.len())
            .finish()
    }
}
