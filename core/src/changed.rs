#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "no-std", derive(defmt::Format))]
pub enum Changed {
    Yes,
    No,
}

#[must_use = "checked_set is useless if the result of the check is not required"]
pub fn checked_set<T: PartialEq>(value: &mut T, new: T) -> Changed {
    if *value == new {
        Changed::No
    } else {
        *value = new;
        Changed::Yes
    }
}

/// The last value a task acted on, used to only report transitions.
pub struct ObservedValue<T: Clone + PartialEq> {
    value: Option<T>,
}

impl<T: Clone + PartialEq> Default for ObservedValue<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Clone + PartialEq> core::ops::Deref for ObservedValue<T> {
    type Target = Option<T>;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T: Clone + PartialEq> ObservedValue<T> {
    pub fn update(&mut self, new_value: T) -> Changed {
        checked_set(&mut self.value, Some(new_value))
    }

    /// Records `new_value` and calls `on_change` with it if it differs from the previous value.
    pub fn update_and<F: FnOnce(&T)>(&mut self, new_value: T, on_change: F) {
        if self.update(new_value) == Changed::Yes {
            if let Some(value) = &self.value {
                on_change(value);
            }
        }
    }
}
