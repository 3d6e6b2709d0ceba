/// Builder methods for the shared keyword surface. Every field kind keeps
/// its declaration state in a `meta: FieldMeta` member.
macro_rules! impl_field_builder {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl $ty {
                /// Append a name (alias) this field is addressed by.
                #[must_use]
                pub fn name(mut self, name: impl Into<String>) -> Self {
                    self.meta.add_name(name);
                    self
                }

                #[must_use]
                pub fn required(mut self, required: bool) -> Self {
                    self.meta.set_required(required);
                    self
                }

                #[must_use]
                pub fn identity(mut self, identity: bool) -> Self {
                    self.meta.set_identity(identity);
                    self
                }

                #[must_use]
                pub fn on_null(mut self, on_null: $crate::field::NullPolicy) -> Self {
                    self.meta.set_null_policy(on_null);
                    self
                }

                #[must_use]
                pub fn default_value(mut self, default: impl Into<$crate::value::Value>) -> Self {
                    self.meta.set_default(Some(default.into()));
                    self
                }

                #[must_use]
                pub fn map_field(mut self, name: impl Into<String>) -> Self {
                    self.meta.set_map_field(name);
                    self
                }

                /// Attach an extra validator after the kind's own.
                #[must_use]
                pub fn validator(mut self, validator: impl $crate::validator::Validator + 'static) -> Self {
                    self.meta.push_validator(validator);
                    self
                }

                /// Apply a full keyword option set.
                #[must_use]
                pub fn options(mut self, options: $crate::field::FieldOptions) -> Self {
                    self.meta.apply(options);
                    self
                }
            }
        )*
    };
}

/// Shared `Field` plumbing for kinds that store a single `value: Value`.
macro_rules! scalar_field_common {
    () => {
        fn meta(&self) -> &$crate::field::FieldMeta {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut $crate::field::FieldMeta {
            &mut self.meta
        }

        fn raw_value(&self) -> $crate::value::Value {
            self.value.clone()
        }

        fn has_value(&self) -> bool {
            !self.value.is_empty()
        }

        fn spawn(&self) -> Box<dyn $crate::field::Field> {
            Box::new(Self {
                meta: self.meta.spawn(),
                value: $crate::value::Value::Null,
                ..self.clone()
            })
        }
    };
}
