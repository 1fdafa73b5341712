//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper for `#[graphql(with = ..)]` attribute of string-like newtypes over
/// domain values (`ListingId`, `ListingSlug`, `PriceBound`).
///
/// The scalar is represented as a GraphQL string, produced by the
/// [`Display`] impl of `As` and validated by its [`FromStr`] impl.
///
/// The newtype must implement [`AsRef`] and [`TryFrom`] for `As`.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Outputs the newtype as a GraphQL string.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the newtype out of a GraphQL string input.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or doesn't pass validation of `As`.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).expect("named scalar");
        let s = input.as_string_value().ok_or_else(|| {
            format!("`{name}` expects a string, found: {input}")
        })?;
        s.parse::<As>()
            .map_err(|e| format!("Cannot parse `{name}` from \"{s}\": {e}"))?
            .try_into()
            .map_err(|e| format!("Invalid `{name}` \"{s}\": {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue, Value};
    use service::{domain, read::listing::list};

    use super::Via;
    use crate::api::listing::{PriceBound, Slug};

    type SlugVia = Via<domain::listing::Slug>;
    type BoundVia = Via<list::PriceBound>;

    fn input(s: &str) -> InputValue<DefaultScalarValue> {
        InputValue::scalar(s.to_owned())
    }

    #[test]
    fn parses_valid_slug() {
        let slug: Slug =
            SlugVia::from_input::<_, DefaultScalarValue>(&input("bofa-20"))
                .unwrap();

        assert_eq!(slug.to_string(), "bofa-20");
        assert_eq!(
            SlugVia::to_output::<_, DefaultScalarValue>(&slug),
            Value::scalar("bofa-20".to_owned()),
        );
    }

    #[test]
    fn rejects_invalid_slug() {
        let spaced = SlugVia::from_input::<Slug, DefaultScalarValue>(&input(
            "bofa phase",
        ))
        .unwrap_err();
        let number = SlugVia::from_input::<Slug, DefaultScalarValue>(
            &InputValue::scalar(20),
        )
        .unwrap_err();

        assert!(spaced.contains("ListingSlug"), "{spaced}");
        assert!(number.contains("expects a string"), "{number}");
    }

    #[test]
    fn parses_price_bound_beyond_int() {
        let bound: PriceBound = BoundVia::from_input::<_, DefaultScalarValue>(
            &input("5,000,000,000"),
        )
        .unwrap();
        let negative = BoundVia::from_input::<PriceBound, DefaultScalarValue>(
            &input("-1"),
        )
        .unwrap_err();

        assert_eq!(list::PriceBound::from(bound).get(), 5_000_000_000);
        assert!(negative.contains("PriceBound"), "{negative}");
    }
}
