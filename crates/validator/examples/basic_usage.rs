//! Basic usage example for keel-validator

use std::sync::Arc;

use keel_validator::prelude::*;
use keel_validator::text_rule;

text_rule! {
    /// Postcodes are five ASCII digits.
    pub Postcode {};
    code: "postcode";
    accept(self, text) { text.len() == 5 && text.bytes().all(|b| b.is_ascii_digit()) }
    message(self, name) { format!("The field {name} must be a five-digit postcode.") }
}

#[derive(Debug)]
struct Signup {
    name: Option<String>,
    email: String,
    postcode: String,
    password: String,
    confirm: String,
    age: i32,
}

fn configure(registry: &ValidatorRegistry) -> Result<(), ConfigError> {
    let signup = registry.for_type::<Signup>();
    signup
        .property("Name", |s: &Signup| &s.name)?
        .apply(required())
        .apply(string_length(2, 40)?);
    signup.property("Email", |s: &Signup| &s.email)?.apply(email());
    signup
        .property("Postcode", |s: &Signup| &s.postcode)?
        .apply(Postcode::new());
    signup
        .property("Password", |s: &Signup| &s.password)?
        .apply(string_length(8, 64)?);
    signup
        .property("Confirm", |s: &Signup| &s.confirm)?
        .apply_per_instance(equal_to("Password", |s: &Signup| &s.password));
    signup.property("Age", |s: &Signup| &s.age)?.apply(range(13, 120)?);
    Ok(())
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = Arc::new(ValidatorRegistry::new());
    configure(&registry)?;

    let mut state = ValidationState::<Signup>::new(Arc::clone(&registry));
    state.subscribe(|event| println!("  event: {event:?}"));

    let mut signup = Signup {
        name: None,
        email: "ada at example".to_owned(),
        postcode: "1234".to_owned(),
        password: "hunter22".to_owned(),
        confirm: "hunter2".to_owned(),
        age: 9,
    };

    println!("Full pass:");
    state.validate_all(&signup);
    for error in state.errors().errors().iter().flat_map(|(_, errors)| errors) {
        println!("  ✗ {error}");
    }

    println!("\nFixing the email:");
    signup.email = "ada@example.com".to_owned();
    state.validate_member(&signup, "Email");
    println!("  has errors: {}", state.has_errors());

    let ctx = ValidationContext::new(&signup).with_member("Age");
    match registry.validate_property(&ctx, Some(&200_i32)) {
        Ok(()) => println!("\n200 is a valid age"),
        Err(error) => println!("\n200 is not a valid age: {error}"),
    }

    Ok(())
}
