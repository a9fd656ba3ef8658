//! Structured outcome of a mutation.
//!
//! Every mutating call returns a [`DataTransactionResult`] instead of an
//! error when the change is refused for business reasons. Results are
//! immutable once built; multi-aspect operations fold per-aspect results
//! together with [`Builder::absorb`].

use std::collections::BTreeSet;

use crate::value::ErasedValue;
use crate::{DataValue, ImmutableValue, Key, KeyId};

/// Overall outcome of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Success,
    Failure,
}

/// Outcome of a mutation: the values that were applied, the values they
/// replaced, and the values that were rejected.
#[derive(Debug, Clone)]
#[must_use]
pub struct DataTransactionResult {
    result_type: ResultType,
    success: Vec<ErasedValue>,
    replaced: Vec<ErasedValue>,
    rejected: Vec<ErasedValue>,
}

impl DataTransactionResult {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Success that changed nothing.
    pub fn success_no_data() -> Self {
        Self::empty(ResultType::Success)
    }

    /// Failure that carries no values.
    pub fn fail_no_data() -> Self {
        Self::empty(ResultType::Failure)
    }

    /// `value` was applied where there was no previous value.
    pub fn success_result<V: DataValue>(value: ImmutableValue<V>) -> Self {
        Self::builder().success(value.into()).build()
    }

    /// `value` was applied, replacing `old`.
    pub fn success_replace_result<V: DataValue>(
        value: ImmutableValue<V>,
        old: ImmutableValue<V>,
    ) -> Self {
        Self::builder()
            .success(value.into())
            .replace(old.into())
            .build()
    }

    /// `old` was removed.
    pub fn success_remove<V: DataValue>(old: ImmutableValue<V>) -> Self {
        Self::builder().replace(old.into()).build()
    }

    /// `value` was refused.
    pub fn fail_result<V: DataValue>(value: ImmutableValue<V>) -> Self {
        Self::builder()
            .result(ResultType::Failure)
            .reject(value.into())
            .build()
    }

    fn empty(result_type: ResultType) -> Self {
        DataTransactionResult {
            result_type,
            success: Vec::new(),
            replaced: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn result_type(&self) -> ResultType {
        self.result_type
    }

    pub fn is_successful(&self) -> bool {
        self.result_type == ResultType::Success
    }

    /// Values now in effect.
    pub fn success_data(&self) -> &[ErasedValue] {
        &self.success
    }

    /// Values that were overwritten or removed.
    pub fn replaced_data(&self) -> &[ErasedValue] {
        &self.replaced
    }

    /// Values that were refused.
    pub fn rejected_data(&self) -> &[ErasedValue] {
        &self.rejected
    }

    /// Whether the result carries no values at all.
    pub fn is_empty(&self) -> bool {
        self.success.is_empty() && self.replaced.is_empty() && self.rejected.is_empty()
    }

    pub fn success_value<V: DataValue>(&self, key: &Key<V>) -> Option<&ImmutableValue<V>> {
        find(&self.success, key)
    }

    pub fn replaced_value<V: DataValue>(&self, key: &Key<V>) -> Option<&ImmutableValue<V>> {
        find(&self.replaced, key)
    }

    pub fn rejected_value<V: DataValue>(&self, key: &Key<V>) -> Option<&ImmutableValue<V>> {
        find(&self.rejected, key)
    }
}

fn find<'a, V: DataValue>(
    values: &'a [ErasedValue],
    key: &Key<V>,
) -> Option<&'a ImmutableValue<V>> {
    values.iter().find_map(|value| value.typed(key))
}

/// Accumulates values and sub-results into one [`DataTransactionResult`].
#[derive(Debug, Default)]
pub struct Builder {
    result_type: Option<ResultType>,
    success: Vec<ErasedValue>,
    replaced: Vec<ErasedValue>,
    rejected: Vec<ErasedValue>,
}

impl Builder {
    pub fn result(mut self, result_type: ResultType) -> Self {
        self.result_type = Some(result_type);
        self
    }

    pub fn success(mut self, value: ErasedValue) -> Self {
        self.success.push(value);
        self
    }

    pub fn replace(mut self, value: ErasedValue) -> Self {
        self.replaced.push(value);
        self
    }

    pub fn reject(mut self, value: ErasedValue) -> Self {
        self.rejected.push(value);
        self
    }

    /// Fold another result into this one. Any failed constituent makes the
    /// aggregate a failure; its applied values are still recorded.
    pub fn absorb(mut self, other: DataTransactionResult) -> Self {
        if other.result_type == ResultType::Failure {
            self.result_type = Some(ResultType::Failure);
        } else if self.result_type.is_none() {
            self.result_type = Some(ResultType::Success);
        }
        self.success.extend(other.success);
        self.replaced.extend(other.replaced);
        self.rejected.extend(other.rejected);
        self
    }

    /// Finish the result. Defaults to success; a success that rejected a
    /// key it also applied is downgraded to a failure.
    pub fn build(self) -> DataTransactionResult {
        let mut result_type = self.result_type.unwrap_or(ResultType::Success);
        if result_type == ResultType::Success {
            let applied: BTreeSet<&KeyId> = self.success.iter().map(|v| v.key_id()).collect();
            if self.rejected.iter().any(|v| applied.contains(v.key_id())) {
                result_type = ResultType::Failure;
            }
        }
        DataTransactionResult {
            result_type,
            success: self.success,
            replaced: self.replaced,
            rejected: self.rejected,
        }
    }
}
