//! Condition evaluator

use crate::condition::ast::{
    eq_folded, fold_case, Condition, Operation, PropertyTypeProvider, PropertyValue,
    SupportedProperties,
};

impl Condition {
    /// Evaluate this condition against the values `provider` returns for its property
    pub fn evaluate<'v, F>(&self, provider: F) -> bool
    where
        F: Fn(&str) -> Option<PropertyValue<'v>>,
    {
        let values = provider(self.name());

        match self.operation() {
            Operation::Equal => self.any_equal(values.as_ref()),
            Operation::NotEqual => !self.any_equal(values.as_ref()),
            Operation::Contains => self.any_contains(values.as_ref()),
            Operation::NotContains => !self.any_contains(values.as_ref()),
        }
    }

    /// Whether this condition can be evaluated by a caller offering `supported`
    pub fn valid_for_properties(
        &self,
        supported: &SupportedProperties,
        type_provider: Option<PropertyTypeProvider<'_>>,
    ) -> bool {
        if !supported.contains(self.name()) {
            return false;
        }

        // Only substring operations care about the declared type
        if self.operation() != Operation::Contains {
            return true;
        }

        match type_provider.and_then(|provider| provider(self.name())) {
            Some(property_type) => property_type.supports_contains(),
            None => true,
        }
    }

    fn any_equal(&self, values: Option<&PropertyValue<'_>>) -> bool {
        values.map_or(false, |v| {
            v.values()
                .iter()
                .any(|value| eq_folded(value, self.folded_value()))
        })
    }

    fn any_contains(&self, values: Option<&PropertyValue<'_>>) -> bool {
        values.map_or(false, |v| {
            v.values()
                .iter()
                .any(|value| fold_case(value).contains(self.folded_value()))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::condition::ast::{Condition, Operation, PropertyType, PropertyValue, SupportedProperties};
    use crate::condition::parser::parse;

    fn single(value: &'static str) -> impl Fn(&str) -> Option<PropertyValue<'static>> {
        move |_| Some(value.into())
    }

    fn none(_: &str) -> Option<PropertyValue<'static>> {
        None
    }

    #[test]
    fn test_equal_is_case_insensitive() {
        let cond = parse("FullyQualifiedName=Test1").unwrap();
        assert!(cond.evaluate(single("Test1")));
        assert!(cond.evaluate(single("TEST1")));
        assert!(!cond.evaluate(single("Test12")));
    }

    #[test]
    fn test_missing_values() {
        assert!(!parse("A=1").unwrap().evaluate(none));
        assert!(parse("A!=1").unwrap().evaluate(none));
        assert!(!parse("A~1").unwrap().evaluate(none));
        assert!(parse("A!~1").unwrap().evaluate(none));
    }

    #[test]
    fn test_contains() {
        let cond = parse("Smoke").unwrap();
        assert!(cond.evaluate(single("Tests.SMOKE.Login")));
        assert!(!cond.evaluate(single("Tests.Login")));

        let cond = parse("Name!~smoke").unwrap();
        assert!(!cond.evaluate(single("SmokeTest")));
        assert!(cond.evaluate(single("Regression")));
    }

    #[test]
    fn test_multi_value() {
        let categories = |_: &str| Some(PropertyValue::from(vec!["Fast", "Nightly"]));

        assert!(parse("Category=nightly").unwrap().evaluate(categories));
        assert!(!parse("Category!=Fast").unwrap().evaluate(categories));
        assert!(parse("Category!=Slow").unwrap().evaluate(categories));
        assert!(parse("Category~igh").unwrap().evaluate(categories));
    }

    #[test]
    fn test_provider_receives_property_name() {
        let provider = |name: &str| match name {
            "Priority" => Some(PropertyValue::from("1")),
            _ => None,
        };
        assert!(parse("Priority=1").unwrap().evaluate(provider));
        assert!(!parse("Owner=1").unwrap().evaluate(provider));
    }

    #[test]
    fn test_valid_for_properties() {
        let supported: SupportedProperties = ["FullyQualifiedName", "Priority"].into_iter().collect();
        let type_of = |name: &str| match name {
            "Priority" => Some(PropertyType::Other("int".to_string())),
            "FullyQualifiedName" => Some(PropertyType::String),
            _ => None,
        };

        let cond = Condition::new("priority", Operation::Equal, "1");
        assert!(cond.valid_for_properties(&supported, Some(&type_of)));

        let cond = Condition::new("Priority", Operation::Contains, "1");
        assert!(!cond.valid_for_properties(&supported, Some(&type_of)));
        assert!(cond.valid_for_properties(&supported, None));

        // Only Contains is type-checked
        let cond = Condition::new("Priority", Operation::NotContains, "1");
        assert!(cond.valid_for_properties(&supported, Some(&type_of)));

        let cond = Condition::new("Owner", Operation::Equal, "me");
        assert!(!cond.valid_for_properties(&supported, None));
    }
}
