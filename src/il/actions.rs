//! Emission patterns shared by the grammar actions of a syntax-directed
//! translator. Each helper takes operand [`Attributes`], emits the quads that
//! compute the result and returns the attributes of that result.

use crate::{error::EmitError, listing::Position};

use super::{
    attributes::Attributes,
    opcode::{self, resolve, SemanticType},
    CodeGenerator, Quad,
};

/// The type of an operation applied to operands of types `lhs` and `rhs`.
pub fn unify(lhs: SemanticType, rhs: SemanticType) -> SemanticType {
    use SemanticType::*;
    match (lhs, rhs) {
        (Error, _) | (_, Error) => Error,
        (Float, _) | (_, Float) => Float,
        (ty, _) => ty,
    }
}

/// Make `operand` usable where a value of type `ty` is expected, emitting an
/// integer to float conversion when needed.
pub fn coerce(
    cg: &mut CodeGenerator,
    operand: &Attributes,
    ty: SemanticType,
) -> Result<Attributes, EmitError> {
    match (operand.ty, ty) {
        (SemanticType::Integer, SemanticType::Float) => {
            let temp = cg.new_temp();
            cg.emit(Quad::unary(
                temp.clone(),
                opcode::INT_TO_FLOAT,
                operand.addr.clone(),
            ))?;
            Ok(Attributes::float(temp))
        }
        _ => Ok(operand.clone()),
    }
}

/// `t := lhs op rhs`, with `op` resolved for the unified operand type.
pub fn binary(
    cg: &mut CodeGenerator,
    base_op: &str,
    lhs: &Attributes,
    rhs: &Attributes,
) -> Result<Attributes, EmitError> {
    let ty = unify(lhs.ty, rhs.ty);
    let lhs = coerce(cg, lhs, ty)?;
    let rhs = coerce(cg, rhs, ty)?;

    let temp = cg.new_temp();
    cg.emit(Quad::bin(temp.clone(), resolve(base_op, ty), lhs.addr, rhs.addr))?;
    Ok(Attributes::new(temp, ty))
}

/// `t := op operand`, e.g. sign change.
pub fn unary(
    cg: &mut CodeGenerator,
    base_op: &str,
    operand: &Attributes,
) -> Result<Attributes, EmitError> {
    let temp = cg.new_temp();
    cg.emit(Quad::unary(
        temp.clone(),
        resolve(base_op, operand.ty),
        operand.addr.clone(),
    ))?;
    Ok(Attributes::new(temp, operand.ty))
}

/// `target := value`, converting the value to the target's type first.
pub fn assign(
    cg: &mut CodeGenerator,
    target: &Attributes,
    value: &Attributes,
) -> Result<Position, EmitError> {
    let value = coerce(cg, value, target.ty)?;
    cg.emit(Quad::assign(target.addr.clone(), value.addr))
}

/// `IF<relation> lhs rhs GOTO target`, with the relation resolved for the
/// unified operand type.
pub fn branch(
    cg: &mut CodeGenerator,
    relation: &str,
    lhs: &Attributes,
    rhs: &Attributes,
    target: Position,
) -> Result<Position, EmitError> {
    let ty = unify(lhs.ty, rhs.ty);
    let lhs = coerce(cg, lhs, ty)?;
    let rhs = coerce(cg, rhs, ty)?;

    let mnemonic = resolve(&format!("{}{}", opcode::IF_PREFIX, relation), ty);
    cg.emit(Quad::if_goto(mnemonic, lhs.addr, rhs.addr, target))
}

/// Open a loop whose body runs `max(count, 1)` times: the counter is tested
/// at the bottom, so a zero or negative count still runs the body once. Returns `count` annotated with the loop start and its hidden
/// counter, to be handed to [`end_repeat`] after the body has been emitted.
pub fn begin_repeat(
    cg: &mut CodeGenerator,
    count: &Attributes,
) -> Result<Attributes, EmitError> {
    let counter = cg.new_temp();
    cg.emit(Quad::assign(counter.clone(), "0"))?;

    Ok(Attributes {
        label: cg.next_index(),
        counter: Some(counter),
        ..count.clone()
    })
}

/// Close a loop opened with [`begin_repeat`]: step the counter and jump back to
/// the loop start while it is below the count. Returns the index of the jump.
pub fn end_repeat(cg: &mut CodeGenerator, repeat: &Attributes) -> Result<Position, EmitError> {
    let counter = repeat
        .counter
        .clone()
        .ok_or_else(|| EmitError::MissingLoopCounter(repeat.addr.to_string()))?;

    cg.emit(Quad::bin(
        counter.clone(),
        resolve("ADD", SemanticType::Integer),
        counter.clone(),
        "1",
    ))?;
    cg.emit(Quad::if_goto(
        resolve("IFLT", SemanticType::Integer),
        counter,
        repeat.addr.clone(),
        repeat.label,
    ))
}
