use super::value::Tag;
use rustc_hash::FxHashMap;

/// Canonical spelling of the key-value ("cons") operator. Styles map
/// their surface separator onto this tag, so downstream consumers see
/// one spelling regardless of grammar.
pub const CONS: &str = ":";
/// Spelling of the implicit juxtaposition pseudo-operator. Never lexed;
/// the engine inserts it between adjacent values.
pub const JUXTAPOSE: &str = " ";

pub const SEQUENCE_PRECEDENCE: u8 = 1;
pub const JUXTAPOSE_PRECEDENCE: u8 = 2;
pub const CONS_PRECEDENCE: u8 = 3;

/// One registered operator form: the downstream evaluation tag, its
/// binding strength, and whether adjacent reductions merge into one
/// n-ary tuple instead of a binary chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpDef {
    pub name: Tag,
    pub precedence: u8,
    pub flatten: bool,
}

impl OpDef {
    fn new(name: &str, precedence: u8, flatten: bool) -> Self {
        Self {
            name: Tag::new(name),
            precedence,
            flatten,
        }
    }
}

/// Registry mapping operator spellings to precedence, fixity and
/// bracket pairing. Built once per grammar and shared by reference with
/// every engine and printer instance.
#[derive(Debug, Clone)]
pub struct Operators {
    prefix: FxHashMap<String, OpDef>,
    infix: FxHashMap<String, OpDef>,
    postfix: FxHashMap<String, OpDef>,
    brackets: FxHashMap<String, String>,
    juxtapose: OpDef,
}

impl Operators {
    /// Every grammar carries the juxtaposition pseudo-operator and the
    /// cons operator; everything else is registered explicitly.
    pub fn new() -> Self {
        let mut table = Self {
            prefix: FxHashMap::default(),
            infix: FxHashMap::default(),
            postfix: FxHashMap::default(),
            brackets: FxHashMap::default(),
            juxtapose: OpDef::new(JUXTAPOSE, JUXTAPOSE_PRECEDENCE, true),
        };
        table.infix.insert(
            CONS.to_string(),
            OpDef::new(CONS, CONS_PRECEDENCE, false),
        );
        table
    }

    pub fn add_prefix(&mut self, op: &str, precedence: u8) -> &mut Self {
        self.add_prefix_named(op, op, precedence)
    }

    /// Registers a prefix form whose evaluation name differs from the
    /// surface spelling.
    pub fn add_prefix_named(&mut self, op: &str, name: &str, precedence: u8) -> &mut Self {
        self.prefix
            .insert(op.to_string(), OpDef::new(name, precedence, false));
        self
    }

    pub fn add_infix(&mut self, op: &str, precedence: u8) -> &mut Self {
        self.infix
            .insert(op.to_string(), OpDef::new(op, precedence, false));
        self
    }

    /// Registers the statement-separator operator; its reductions merge
    /// adjacent occurrences into one n-ary tuple.
    pub fn add_sequence(&mut self, op: &str) -> &mut Self {
        self.infix
            .insert(op.to_string(), OpDef::new(op, SEQUENCE_PRECEDENCE, true));
        self
    }

    pub fn add_postfix(&mut self, op: &str, precedence: u8) -> &mut Self {
        self.add_postfix_named(op, op, precedence)
    }

    pub fn add_postfix_named(&mut self, op: &str, name: &str, precedence: u8) -> &mut Self {
        self.postfix
            .insert(op.to_string(), OpDef::new(name, precedence, false));
        self
    }

    pub fn add_bracket(&mut self, open: char, close: char) -> &mut Self {
        self.brackets.insert(open.to_string(), close.to_string());
        self
    }

    pub fn prefix(&self, op: &str) -> Option<&OpDef> {
        self.prefix.get(op)
    }

    pub fn infix(&self, op: &str) -> Option<&OpDef> {
        self.infix.get(op)
    }

    pub fn postfix(&self, op: &str) -> Option<&OpDef> {
        self.postfix.get(op)
    }

    pub fn juxtapose(&self) -> &OpDef {
        &self.juxtapose
    }

    pub fn close_for(&self, open: &str) -> Option<&str> {
        self.brackets.get(open).map(String::as_str)
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.prefix.contains_key(op) || self.infix.contains_key(op) || self.postfix.contains_key(op)
    }

    // Reverse lookups used by the printer, which sees evaluation names.
    pub fn prefix_spelling(&self, name: &Tag) -> Option<&str> {
        self.prefix
            .iter()
            .find(|(_, def)| def.name == *name)
            .map(|(op, _)| op.as_str())
    }

    pub fn infix_spelling(&self, name: &Tag) -> Option<&str> {
        self.infix
            .iter()
            .find(|(_, def)| def.name == *name)
            .map(|(op, _)| op.as_str())
    }

    pub fn postfix_spelling(&self, name: &Tag) -> Option<&str> {
        self.postfix
            .iter()
            .find(|(_, def)| def.name == *name)
            .map(|(op, _)| op.as_str())
    }
}

impl Default for Operators {
    fn default() -> Self {
        Self::new()
    }
}
