//! This module contains [`Memoised`], which ties a generated value to the parameters it was
//! generated from.

/// A generated value along with the key it was generated from.
///
/// The value is only ever rebuilt by [`refresh`](Self::refresh), and only when the key changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Memoised<K, V> {
    key: K,
    value: V,
}

impl<K: PartialEq, V> Memoised<K, V> {
    /// Generate the value for `key`.
    pub fn generate<E>(key: K, generate: impl FnOnce(&K) -> Result<V, E>) -> Result<Self, E> {
        let value = generate(&key)?;
        Ok(Self { key, value })
    }

    /// The key the value was generated from.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The generated value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The generated value, mutably.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Whether the value was generated from `key`.
    pub fn is_fresh(&self, key: &K) -> bool {
        &self.key == key
    }

    /// Regenerate the value if `key` differs from the key it was generated from.
    ///
    /// Returns whether the value was regenerated. If generation fails, the old key and value are
    /// kept.
    pub fn refresh<E>(
        &mut self,
        key: K,
        generate: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<bool, E> {
        if self.is_fresh(&key) {
            return Ok(false);
        }

        self.value = generate(&key)?;
        self.key = key;
        Ok(true)
    }
}
