//! Quadruples: three-address code instructions with up to four fields.

use std::fmt::{self, Display, Formatter};

use crate::listing::{Listing, Position};

use super::opcode::{self, IF_PREFIX};

pub type QuadListing = Listing<Quad>;

/// A quad address: a source identifier, the text of a literal, or a
/// generated temporary. Addresses carry no type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Address(String);
impl Address {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl From<&str> for Address {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}
impl From<String> for Address {
    fn from(text: String) -> Self {
        Self(text)
    }
}
impl From<Position> for Address {
    fn from(position: Position) -> Self {
        Self(position.to_string())
    }
}
impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

/// The untyped four-field form of a quad, in `op arg1 arg2 res` order.
/// Each field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuad {
    pub op: Option<String>,
    pub arg1: Option<String>,
    pub arg2: Option<String>,
    pub res: Option<String>,
}
impl RawQuad {
    /// Copy the borrowed fields into a new raw quad.
    pub fn new(op: Option<&str>, arg1: Option<&str>, arg2: Option<&str>, res: Option<&str>) -> Self {
        Self {
            op: op.map(str::to_owned),
            arg1: arg1.map(str::to_owned),
            arg2: arg2.map(str::to_owned),
            res: res.map(str::to_owned),
        }
    }
}
impl Display for RawQuad {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fn field(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("")
        }
        write!(
            f,
            "{} {} {} {}",
            field(&self.op),
            field(&self.arg1),
            field(&self.arg2),
            field(&self.res)
        )
    }
}

/// A single quad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quad {
    /// Jump to `target` if the comparison named by the mnemonic holds.
    IfGoto {
        mnemonic: String,
        lhs: Address,
        rhs: Address,
        target: Address,
    },
    /// Jump to `target` unconditionally.
    Goto(Address),
    /// Stop the program.
    Halt,
    /// `array[offset] := value`
    ArraySet {
        array: Address,
        offset: Address,
        value: Address,
    },
    /// `target := array[offset]`
    ArrayGet {
        target: Address,
        array: Address,
        offset: Address,
    },
    /// Push a parameter for the next call.
    Param(Address),
    /// Call a function with the given number of pushed parameters.
    Call { function: Address, arg_count: Address },
    /// Assign a value to a name.
    Assign { target: Address, value: Address },
    /// `target := lhs op rhs`
    Bin {
        target: Address,
        op: String,
        lhs: Address,
        rhs: Address,
    },
    /// `target := op operand`
    Unary {
        target: Address,
        op: String,
        operand: Address,
    },
    /// A quad that does not fit any of the other shapes.
    Raw(RawQuad),
}

impl Quad {
    pub fn if_goto<M, L, R, T>(mnemonic: M, lhs: L, rhs: R, target: T) -> Self
    where
        M: Into<String>,
        L: Into<Address>,
        R: Into<Address>,
        T: Into<Address>,
    {
        Self::IfGoto {
            mnemonic: mnemonic.into(),
            lhs: lhs.into(),
            rhs: rhs.into(),
            target: target.into(),
        }
    }

    pub fn goto<T: Into<Address>>(target: T) -> Self {
        Self::Goto(target.into())
    }

    pub fn assign<T: Into<Address>, V: Into<Address>>(target: T, value: V) -> Self {
        Self::Assign {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn bin<T, O, L, R>(target: T, op: O, lhs: L, rhs: R) -> Self
    where
        T: Into<Address>,
        O: Into<String>,
        L: Into<Address>,
        R: Into<Address>,
    {
        Self::Bin {
            target: target.into(),
            op: op.into(),
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn unary<T, O, V>(target: T, op: O, operand: V) -> Self
    where
        T: Into<Address>,
        O: Into<String>,
        V: Into<Address>,
    {
        Self::Unary {
            target: target.into(),
            op: op.into(),
            operand: operand.into(),
        }
    }

    pub fn array_set<A, O, V>(array: A, offset: O, value: V) -> Self
    where
        A: Into<Address>,
        O: Into<Address>,
        V: Into<Address>,
    {
        Self::ArraySet {
            array: array.into(),
            offset: offset.into(),
            value: value.into(),
        }
    }

    pub fn array_get<T, A, O>(target: T, array: A, offset: O) -> Self
    where
        T: Into<Address>,
        A: Into<Address>,
        O: Into<Address>,
    {
        Self::ArrayGet {
            target: target.into(),
            array: array.into(),
            offset: offset.into(),
        }
    }

    pub fn param<V: Into<Address>>(value: V) -> Self {
        Self::Param(value.into())
    }

    pub fn call<F: Into<Address>>(function: F, arg_count: usize) -> Self {
        Self::Call {
            function: function.into(),
            arg_count: arg_count.into(),
        }
    }

    /// Infer the kind of a raw quad from its mnemonic and from which fields
    /// are present. The checks run in a fixed order and the first match wins.
    /// Fields a matched kind needs but that are absent become empty addresses.
    pub fn classify(raw: RawQuad) -> Self {
        fn addr(field: Option<String>) -> Address {
            Address(field.unwrap_or_default())
        }

        let RawQuad {
            op,
            arg1,
            arg2,
            res,
        } = raw;

        match op.as_deref() {
            Some(mnemonic) if mnemonic.starts_with(IF_PREFIX) => {
                return Self::IfGoto {
                    mnemonic: mnemonic.to_owned(),
                    lhs: addr(arg1),
                    rhs: addr(arg2),
                    target: addr(res),
                }
            }
            Some(opcode::GOTO) => return Self::Goto(addr(res)),
            Some(opcode::HALT) => return Self::Halt,
            Some(opcode::ARRAY_SET) => {
                return Self::ArraySet {
                    array: addr(arg1),
                    offset: addr(arg2),
                    value: addr(res),
                }
            }
            Some(opcode::ARRAY_GET) => {
                return Self::ArrayGet {
                    target: addr(res),
                    array: addr(arg1),
                    offset: addr(arg2),
                }
            }
            Some(opcode::PARAM) => return Self::Param(addr(arg1)),
            Some(opcode::CALL) => {
                return Self::Call {
                    function: addr(arg1),
                    arg_count: addr(arg2),
                }
            }
            Some(opcode::ASSIGN) => {
                return Self::Assign {
                    target: addr(res),
                    value: addr(arg1),
                }
            }
            _ => (),
        }

        match (arg1, arg2, res) {
            (Some(lhs), Some(rhs), Some(target)) => Self::Bin {
                target: Address(target),
                op: op.unwrap_or_default(),
                lhs: Address(lhs),
                rhs: Address(rhs),
            },
            (Some(operand), None, Some(target)) => Self::Unary {
                target: Address(target),
                op: op.unwrap_or_default(),
                operand: Address(operand),
            },
            (arg1, arg2, res) => Self::Raw(RawQuad {
                op,
                arg1,
                arg2,
                res,
            }),
        }
    }

    /// Flatten this quad back into its four fields, in the positions
    /// [`Quad::classify`] reads them from.
    pub fn into_raw(self) -> RawQuad {
        fn some<A: Into<Address>>(value: A) -> Option<String> {
            Some(Into::<Address>::into(value).0)
        }

        let (op, arg1, arg2, res) = match self {
            Self::IfGoto {
                mnemonic,
                lhs,
                rhs,
                target,
            } => (some(mnemonic), some(lhs), some(rhs), some(target)),
            Self::Goto(target) => (some(opcode::GOTO), None, None, some(target)),
            Self::Halt => (some(opcode::HALT), None, None, None),
            Self::ArraySet {
                array,
                offset,
                value,
            } => (some(opcode::ARRAY_SET), some(array), some(offset), some(value)),
            Self::ArrayGet {
                target,
                array,
                offset,
            } => (some(opcode::ARRAY_GET), some(array), some(offset), some(target)),
            Self::Param(value) => (some(opcode::PARAM), some(value), None, None),
            Self::Call {
                function,
                arg_count,
            } => (some(opcode::CALL), some(function), some(arg_count), None),
            Self::Assign { target, value } => (some(opcode::ASSIGN), some(value), None, some(target)),
            Self::Bin {
                target,
                op,
                lhs,
                rhs,
            } => (some(op), some(lhs), some(rhs), some(target)),
            Self::Unary {
                target,
                op,
                operand,
            } => (some(op), some(operand), None, some(target)),
            Self::Raw(raw) => return raw,
        };
        RawQuad {
            op,
            arg1,
            arg2,
            res,
        }
    }

    /// The jump target of a branch, if it is a valid position.
    pub fn jump_target(&self) -> Option<Position> {
        match self {
            Self::IfGoto { target, .. } | Self::Goto(target) => {
                target.as_str().parse().ok().map(Position)
            }
            _ => None,
        }
    }

    /// Render this quad in the given style.
    pub fn display(&self, style: RenderStyle) -> QuadDisplay {
        QuadDisplay { quad: self, style }
    }
}
impl Display for Quad {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.display(RenderStyle::Verbatim).fmt(f)
    }
}

/// How conditional branches are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderStyle {
    /// `IFLTI a b GOTO 7`
    #[default]
    Verbatim,
    /// `IF a LTI b GOTO 7`
    SplitBranches,
}

pub struct QuadDisplay<'a> {
    quad: &'a Quad,
    style: RenderStyle,
}
impl Display for QuadDisplay<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.quad {
            Quad::IfGoto {
                mnemonic,
                lhs,
                rhs,
                target,
            } => match self.style {
                RenderStyle::Verbatim => {
                    write!(f, "{} {} {} GOTO {}", mnemonic, lhs, rhs, target)
                }
                RenderStyle::SplitBranches => {
                    let relation = mnemonic
                        .strip_prefix(IF_PREFIX)
                        .unwrap_or(mnemonic)
                        .trim();
                    write!(f, "IF {} {} {} GOTO {}", lhs, relation, rhs, target)
                }
            },
            Quad::Goto(target) => write!(f, "GOTO {}", target),
            Quad::Halt => f.write_str("HALT"),
            Quad::ArraySet {
                array,
                offset,
                value,
            } => write!(f, "{}[{}] := {}", array, offset, value),
            Quad::ArrayGet {
                target,
                array,
                offset,
            } => write!(f, "{} := {}[{}]", target, array, offset),
            Quad::Param(value) => write!(f, "PARAM {}", value),
            Quad::Call {
                function,
                arg_count,
            } => write!(f, "CALL {}, {}", function, arg_count),
            Quad::Assign { target, value } => write!(f, "{} := {}", target, value),
            Quad::Bin {
                target,
                op,
                lhs,
                rhs,
            } => write!(f, "{} := {} {} {}", target, lhs, op, rhs),
            Quad::Unary {
                target,
                op,
                operand,
            } => write!(f, "{} := {} {}", target, op, operand),
            Quad::Raw(raw) => raw.fmt(f),
        }
    }
}
