#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare a grammar rule.
///
/// `captures` lists the named groups the builder needs together with their
/// types; the macro turns them into a local record struct filled from the
/// match bindings. A capture that fails to convert rejects the match. Naming
/// a third closure argument makes the builder consume the base damage.
///
/// The builder body may evaluate to an `EffectBuilder` or to an
/// `Option<EffectBuilder>` (`None` rejects the bindings).
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:literal,
        $(buckets: $buckets:expr,)?
        captures: { $($field:ident : $ty:ty),* $(,)? },
        examples: [ $($example:literal),* $(,)? ],
        build: |$b:ident, $caps:tt $(, $damage:ident)?| $body:expr
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            pattern: $crate::regex!($pat),
            captures: &[ $(stringify!($field)),* ],
            uses_damage: { false $(|| { let _ = stringify!($damage); true })? },
            buckets: { 0 $(| $buckets)? },
            examples: &[ $($example),* ],
            build: |bindings: &$crate::Bindings, damage_value: Option<u32>| -> Option<$crate::effect::EffectSequence> {
                #[allow(dead_code)]
                struct Captures {
                    $($field: $ty),*
                }
                let $caps = Captures { $($field: bindings.get::<$ty>(stringify!($field))?),* };
                $(let $damage: Option<u32> = damage_value;)?
                let _ = (bindings, damage_value);
                let $b = $crate::builder::EffectBuilder::new();
                let built: Option<$crate::builder::EffectBuilder> = ($body).into();
                built.map($crate::builder::EffectBuilder::build)
            },
        }
    }};
}
