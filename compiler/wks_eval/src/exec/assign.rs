//! Assignment targets and unpacking.
//!
//! The right-hand side is always evaluated first. Compound forms then read
//! the target's current value fresh, apply the operator in place, and
//! write the result back.

use wks_ir::{AssignOp, Expression, LoopTarget};

use super::{get_item, set_item};
use crate::errors::{unpack_mismatch, EvalResult};
use crate::interpreter::Evaluator;
use crate::methods::{get_property, set_property};
use crate::operators::evaluate_in_place;
use crate::sandbox::check_attribute;
use crate::Value;

impl Evaluator<'_> {
    pub(super) fn exec_set_variable(
        &self,
        name: &str,
        op: AssignOp,
        value: &Expression,
    ) -> EvalResult<()> {
        let mut value = self.eval(value)?;
        if let Some(op) = op.binary_op() {
            let current = self.lookup(name)?;
            value = evaluate_in_place(&current, &value, op)?;
        }
        self.define(name, value);
        Ok(())
    }

    pub(super) fn exec_set_property(
        &self,
        object: &Expression,
        property: &str,
        op: AssignOp,
        value: &Expression,
    ) -> EvalResult<()> {
        let mut value = self.eval(value)?;
        let object = self.eval(object)?;
        check_attribute(object.type_name(), property)?;
        if let Some(op) = op.binary_op() {
            let current = get_property(&object, property)?;
            value = evaluate_in_place(&current, &value, op)?;
        }
        set_property(&object, property, value)
    }

    pub(super) fn exec_set_item(
        &self,
        object: &Expression,
        index: &Expression,
        op: AssignOp,
        value: &Expression,
    ) -> EvalResult<()> {
        let mut value = self.eval(value)?;
        let object = self.eval(object)?;
        let index = self.eval(index)?;
        if let Some(op) = op.binary_op() {
            let current = get_item(&object, &index)?;
            value = evaluate_in_place(&current, &value, op)?;
        }
        set_item(&object, &index, value)
    }

    /// `a, b = value`: bind each name to one element.
    pub(super) fn unpack_into(&self, names: &[String], value: &Value) -> EvalResult<()> {
        let items = unpack(value, names.len())?;
        for (name, item) in names.iter().zip(items) {
            self.define(name, item);
        }
        Ok(())
    }

    pub(super) fn bind_loop_target(&self, target: &LoopTarget, item: Value) -> EvalResult<()> {
        match target {
            LoopTarget::Single(name) => {
                self.define(name, item);
                Ok(())
            }
            LoopTarget::Unpack(names) => self.unpack_into(names, &item),
        }
    }
}

/// Split `value` into exactly `expected` elements.
///
/// At most one element past `expected` is drawn, so unpacking a huge
/// range fails without materialising it.
pub(crate) fn unpack(value: &Value, expected: usize) -> EvalResult<Vec<Value>> {
    let items: Vec<Value> = value.iter()?.take(expected + 1).collect();
    if items.len() == expected {
        Ok(items)
    } else {
        Err(unpack_mismatch(expected, items.len()))
    }
}

/// A two-element sequence as a pair.
pub(crate) fn unpack_pair(value: &Value) -> EvalResult<(Value, Value)> {
    let mut items = unpack(value, 2)?.into_iter();
    match (items.next(), items.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(unpack_mismatch(2, 0)),
    }
}
