//! Typed callback adapter.
//!
//! Lets callers hand strongly typed closures (`|x: i64| x > 2`) to operators
//! that work on dynamic [`Value`]s. A closure is checked once, when it is
//! attached, against a [`ParamValidator`] and the element kind of the
//! sequence; after that it is invoked per element with no further checks
//! beyond extracting its typed argument.
//!
//! This path is strictly slower than passing a `Fn(&Value)` closure directly
//! (an argument clone plus extraction per element). Avoid it in hot loops.

use lazyq_core::convert::{FromValue, IntoValue, TypeShape};
use lazyq_core::error::{Error, Result};
use lazyq_core::types::{Value, ValueKind};

/// Parameter and return shapes of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<TypeShape>,
    pub returns: TypeShape,
}

/// A closure usable through the adapter. `Args` is the closure's parameter
/// tuple; implemented for arities 0 through 2.
pub trait Callable<Args> {
    fn signature(&self) -> Signature;

    /// `None` when an argument cannot be extracted as its declared type.
    fn call_with(&self, args: &[Value]) -> Option<Value>;
}

impl<F, R> Callable<()> for F
where
    F: Fn() -> R,
    R: IntoValue,
{
    fn signature(&self) -> Signature {
        Signature {
            params: vec![],
            returns: R::SHAPE,
        }
    }

    fn call_with(&self, _args: &[Value]) -> Option<Value> {
        Some(self().into_value())
    }
}

impl<F, A, R> Callable<(A,)> for F
where
    F: Fn(A) -> R,
    A: FromValue,
    R: IntoValue,
{
    fn signature(&self) -> Signature {
        Signature {
            params: vec![A::SHAPE],
            returns: R::SHAPE,
        }
    }

    fn call_with(&self, args: &[Value]) -> Option<Value> {
        let a = A::from_value(args.first()?.clone())?;
        Some(self(a).into_value())
    }
}

impl<F, A, B, R> Callable<(A, B)> for F
where
    F: Fn(A, B) -> R,
    A: FromValue,
    B: FromValue,
    R: IntoValue,
{
    fn signature(&self) -> Signature {
        Signature {
            params: vec![A::SHAPE, B::SHAPE],
            returns: R::SHAPE,
        }
    }

    fn call_with(&self, args: &[Value]) -> Option<Value> {
        let a = A::from_value(args.first()?.clone())?;
        let b = B::from_value(args.get(1)?.clone())?;
        Some(self(a, b).into_value())
    }
}

/// Declared constraint for one parameter or the return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The sequence's element type (bound from the first element).
    Element,
    Bool,
    Any,
}

/// Shape an operator requires of its callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValidator {
    params: Vec<Slot>,
    returns: Slot,
}

impl ParamValidator {
    pub fn simple(params: Vec<Slot>, returns: Slot) -> Self {
        Self { params, returns }
    }

    /// `fn(Element) -> bool`
    pub fn predicate() -> Self {
        Self::simple(vec![Slot::Element], Slot::Bool)
    }

    /// `fn(Element) -> any`
    pub fn selector() -> Self {
        Self::simple(vec![Slot::Element], Slot::Any)
    }

    /// Check `sig` against this shape. `element` is the sequence's element
    /// kind, or `None` if the sequence is empty and nothing can be bound.
    pub fn validate(
        &self,
        sig: &Signature,
        element: Option<ValueKind>,
    ) -> std::result::Result<(), String> {
        if sig.params.len() != self.params.len() {
            return Err(format!(
                "expected {} parameter(s), found {}",
                self.params.len(),
                sig.params.len()
            ));
        }
        for (i, (slot, shape)) in self.params.iter().zip(&sig.params).enumerate() {
            check_slot(*slot, *shape, element)
                .map_err(|reason| format!("parameter {}: {}", i + 1, reason))?;
        }
        check_slot(self.returns, sig.returns, element)
            .map_err(|reason| format!("return type: {}", reason))
    }
}

fn check_slot(
    slot: Slot,
    shape: TypeShape,
    element: Option<ValueKind>,
) -> std::result::Result<(), String> {
    match (slot, shape) {
        (Slot::Any, _) => Ok(()),
        (Slot::Bool, TypeShape::Kind(ValueKind::Bool)) => Ok(()),
        (Slot::Bool, other) => Err(format!("expected bool, found {other}")),
        (Slot::Element, shape) => match element {
            Some(elem) if !shape.accepts(elem) => Err(format!(
                "declared {shape} but the sequence yields {elem}"
            )),
            _ => Ok(()),
        },
    }
}

/// A validated callable with a uniform `invoke(element)` entry point.
pub struct GenericFunc<'f> {
    operator: &'static str,
    param: &'static str,
    returns: Slot,
    call: Box<dyn Fn(&[Value]) -> Option<Value> + 'f>,
}

impl<'f> GenericFunc<'f> {
    /// Validate `f` and wrap it. Fails with `Error::CallbackShape` naming the
    /// operator and parameter when `f` does not fit `validator`.
    pub fn new<Args, F>(
        operator: &'static str,
        param: &'static str,
        f: F,
        validator: &ParamValidator,
        element: Option<ValueKind>,
    ) -> Result<Self>
    where
        F: Callable<Args> + 'f,
        Args: 'f,
    {
        validator
            .validate(&f.signature(), element)
            .map_err(|reason| Error::CallbackShape {
                operator,
                param,
                reason,
            })?;

        Ok(Self {
            operator,
            param,
            returns: validator.returns,
            call: Box::new(move |args: &[Value]| f.call_with(args)),
        })
    }

    /// Call with one element.
    ///
    /// # Panics
    ///
    /// If the element cannot be extracted as the callable's parameter type
    /// (a heterogeneous sequence after validation), or if the result breaks
    /// the declared return shape.
    pub fn invoke(&self, item: &Value) -> Value {
        let out = (self.call)(std::slice::from_ref(item)).unwrap_or_else(|| {
            panic!(
                "{}: {} cannot take an element of type {}",
                self.operator,
                self.param,
                item.kind()
            )
        });
        if self.returns == Slot::Bool && !matches!(out, Value::Bool(_)) {
            self.bad_return(&out);
        }
        out
    }

    /// [`invoke`](Self::invoke) for predicates.
    pub fn invoke_bool(&self, item: &Value) -> bool {
        match self.invoke(item) {
            Value::Bool(b) => b,
            other => self.bad_return(&other),
        }
    }

    fn bad_return(&self, out: &Value) -> ! {
        panic!(
            "{}: {} returned {}, expected bool",
            self.operator,
            self.param,
            out.kind()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind<'f, Args: 'f, F: Callable<Args> + 'f>(
        f: F,
        validator: ParamValidator,
        element: Option<ValueKind>,
    ) -> Result<GenericFunc<'f>> {
        GenericFunc::new("all_t", "predicate", f, &validator, element)
    }

    #[test]
    fn valid_predicate_is_invoked() {
        let func = bind(
            |x: i64| x > 2,
            ParamValidator::predicate(),
            Some(ValueKind::I64),
        )
        .unwrap();
        assert!(func.invoke_bool(&Value::I64(3)));
        assert!(!func.invoke_bool(&Value::I64(1)));
    }

    #[test]
    fn parameter_type_mismatch_names_operator_and_param() {
        let err = bind(
            |s: String| s.is_empty(),
            ParamValidator::predicate(),
            Some(ValueKind::I64),
        )
        .err()
        .unwrap();
        match &err {
            Error::CallbackShape {
                operator, param, ..
            } => {
                assert_eq!(*operator, "all_t");
                assert_eq!(*param, "predicate");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("declared str but the sequence yields i64"));
    }

    #[test]
    fn arity_is_checked() {
        let err = bind(
            |a: i64, b: i64| a == b,
            ParamValidator::predicate(),
            Some(ValueKind::I64),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("expected 1 parameter(s), found 2"));

        let err = bind(|| true, ParamValidator::predicate(), None).err().unwrap();
        assert!(err.to_string().contains("found 0"));
    }

    #[test]
    fn predicate_must_return_bool() {
        let err = bind(|x: i64| x + 1, ParamValidator::predicate(), Some(ValueKind::I64))
            .err()
            .unwrap();
        assert!(err.to_string().contains("return type: expected bool, found i64"));
    }

    #[test]
    fn selector_accepts_any_return_and_dynamic_params() {
        let func = bind(
            |v: Value| v.kind().name().to_string(),
            ParamValidator::selector(),
            Some(ValueKind::U8),
        )
        .unwrap();
        assert_eq!(func.invoke(&Value::U8(1)), Value::Str("u8".into()));
    }

    #[test]
    fn element_slot_checks_shape_against_bound_kind() {
        let validator = ParamValidator::predicate();
        let sig = |params| Signature {
            params,
            returns: TypeShape::Kind(ValueKind::Bool),
        };
        assert!(validator
            .validate(&sig(vec![TypeShape::Any]), Some(ValueKind::Pair))
            .is_ok());
        assert!(validator
            .validate(&sig(vec![TypeShape::Kind(ValueKind::U16)]), Some(ValueKind::U16))
            .is_ok());
        let reason = validator
            .validate(&sig(vec![TypeShape::Kind(ValueKind::U16)]), Some(ValueKind::U8))
            .unwrap_err();
        assert_eq!(reason, "parameter 1: declared u16 but the sequence yields u8");
    }

    #[test]
    fn unbound_element_accepts_any_param_type() {
        assert!(bind(|x: f32| x > 0.0, ParamValidator::predicate(), None).is_ok());
    }

    #[test]
    #[should_panic(expected = "cannot take an element of type str")]
    fn heterogeneous_element_panics_on_invoke() {
        let func = bind(
            |x: i64| x > 0,
            ParamValidator::predicate(),
            Some(ValueKind::I64),
        )
        .unwrap();
        func.invoke_bool(&Value::Str("oops".into()));
    }
}
