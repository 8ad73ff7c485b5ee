//! Typed-callback variants of the predicate and selector operators.
//!
//! Each one pulls the first element to learn the sequence's element kind,
//! validates the callable against it, and then runs the same loop as its
//! `Fn(&Value)` counterpart over the untouched sequence (head included).
//! Shape errors are reported before any element reaches the callable.
//!
//! These are convenience entry points; per element they pay for an argument
//! clone and a typed extraction the untyped operators avoid.

use lazyq_core::error::Result;
use lazyq_core::types::Value;

use crate::generic::{Callable, GenericFunc, ParamValidator};
use crate::materialize::MapSink;
use crate::sequence::{Cursor, Peeked, Query};
use crate::terminal::{
    all_in, any_with_in, count_with_in, first_with_in, last_with_in, single_with_in, to_map_by_in,
};
use crate::trace;

impl Query {
    fn bind_typed<'f, Args, F>(
        &self,
        operator: &'static str,
        param: &'static str,
        f: F,
        validator: &ParamValidator,
        cursor: &Peeked<Cursor>,
    ) -> Result<GenericFunc<'f>>
    where
        F: Callable<Args> + 'f,
        Args: 'f,
    {
        let element = cursor.peek().map(|head| head.kind());
        trace::typed_callback_bound(
            operator,
            param,
            element,
            self.config().warn_on_typed_callbacks,
        );
        GenericFunc::new(operator, param, f, validator, element)
    }

    /// [`all`](Query::all) with a typed predicate such as `|x: i64| x > 0`.
    ///
    /// # Panics
    ///
    /// If a later element is not of the kind the first element bound.
    pub fn all_t<Args, F>(&self, predicate: F) -> Result<bool>
    where
        F: Callable<Args>,
    {
        let mut cursor = Peeked::new(self.iterate());
        let func = self.bind_typed(
            "all_t",
            "predicate",
            predicate,
            &ParamValidator::predicate(),
            &cursor,
        )?;
        Ok(all_in(&mut cursor, |item| func.invoke_bool(item)))
    }

    pub fn any_with_t<Args, F>(&self, predicate: F) -> Result<bool>
    where
        F: Callable<Args>,
    {
        let mut cursor = Peeked::new(self.iterate());
        let func = self.bind_typed(
            "any_with_t",
            "predicate",
            predicate,
            &ParamValidator::predicate(),
            &cursor,
        )?;
        Ok(any_with_in(&mut cursor, |item| func.invoke_bool(item)))
    }

    pub fn count_with_t<Args, F>(&self, predicate: F) -> Result<usize>
    where
        F: Callable<Args>,
    {
        let mut cursor = Peeked::new(self.iterate());
        let func = self.bind_typed(
            "count_with_t",
            "predicate",
            predicate,
            &ParamValidator::predicate(),
            &cursor,
        )?;
        Ok(count_with_in(&mut cursor, |item| func.invoke_bool(item)))
    }

    pub fn first_with_t<Args, F>(&self, predicate: F) -> Result<Option<Value>>
    where
        F: Callable<Args>,
    {
        let mut cursor = Peeked::new(self.iterate());
        let func = self.bind_typed(
            "first_with_t",
            "predicate",
            predicate,
            &ParamValidator::predicate(),
            &cursor,
        )?;
        Ok(first_with_in(&mut cursor, |item| func.invoke_bool(item)))
    }

    pub fn last_with_t<Args, F>(&self, predicate: F) -> Result<Option<Value>>
    where
        F: Callable<Args>,
    {
        let mut cursor = Peeked::new(self.iterate());
        let func = self.bind_typed(
            "last_with_t",
            "predicate",
            predicate,
            &ParamValidator::predicate(),
            &cursor,
        )?;
        Ok(last_with_in(&mut cursor, |item| func.invoke_bool(item)))
    }

    pub fn single_with_t<Args, F>(&self, predicate: F) -> Result<Option<Value>>
    where
        F: Callable<Args>,
    {
        let mut cursor = Peeked::new(self.iterate());
        let func = self.bind_typed(
            "single_with_t",
            "predicate",
            predicate,
            &ParamValidator::predicate(),
            &cursor,
        )?;
        Ok(single_with_in(&mut cursor, |item| func.invoke_bool(item)))
    }

    /// [`to_map_by`](Query::to_map_by) with typed selectors. Both are checked
    /// before anything is inserted; the key selector is reported first.
    pub fn to_map_by_t<M, KArgs, K, VArgs, V>(
        &self,
        dest: &mut M,
        key_selector: K,
        value_selector: V,
    ) -> Result<()>
    where
        M: MapSink + ?Sized,
        K: Callable<KArgs>,
        V: Callable<VArgs>,
    {
        let mut cursor = Peeked::new(self.iterate());
        let selector = ParamValidator::selector();
        let key = self.bind_typed("to_map_by_t", "key_selector", key_selector, &selector, &cursor)?;
        let value = self.bind_typed(
            "to_map_by_t",
            "value_selector",
            value_selector,
            &selector,
            &cursor,
        )?;
        to_map_by_in(
            dest,
            &mut cursor,
            |item| key.invoke(item),
            |item| value.invoke(item),
        )
    }
}
