//! Mnemonics and type-directed opcode selection.

/// Marker every conditional branch mnemonic starts with.
pub const IF_PREFIX: &str = "IF";
pub const GOTO: &str = "GOTO";
pub const HALT: &str = "HALT";
pub const ARRAY_SET: &str = "arr_set";
pub const ARRAY_GET: &str = "arr_get";
pub const PARAM: &str = "PARAM";
pub const CALL: &str = "CALL";
pub const ASSIGN: &str = ":=";

/// Integer to float conversion.
pub const INT_TO_FLOAT: &str = "I2F";

/// The semantic type of an operand, as decided by the type checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Integer,
    Float,
    Boolean,
    /// Propagated after a type error to suppress follow-up diagnostics.
    Error,
}
impl SemanticType {
    /// The mnemonic suffix for operations on this type.
    pub fn suffix(self) -> char {
        match self {
            SemanticType::Float => 'F',
            SemanticType::Integer | SemanticType::Boolean | SemanticType::Error => 'I',
        }
    }
}

/// Select the concrete mnemonic for `base` applied to operands of type `ty`.
pub fn resolve(base: &str, ty: SemanticType) -> String {
    let mut mnemonic = String::with_capacity(base.len() + 1);
    mnemonic.push_str(base);
    mnemonic.push(ty.suffix());
    mnemonic
}
