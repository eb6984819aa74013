use dotenvy::{dotenv, from_filename, var};

pub fn check_for_env_variables() {
    // POSTGRES_URL is necessary for operation, so the app panics if it
    // isn't present.
    match get_env_variable("POSTGRES_URL") {
        Some(_) => println!("Postgres URL set ✅"),
        None => panic!("Please set a valid Postgres connection URL as POSTGRES_URL in your environment variables"),
    };

    match get_env_variable("VERBOSITY") {
        Some(_) => println!("Log verbosity set ✅"),
        None => println!("VERBOSITY not set, defaulting to INFO. ⚠️"),
    };
}

pub fn get_env_variable(variable_to_get: &str) -> Option<String> {
    let environment = var("RUST_ENV").unwrap_or_else(|_| "development".into());

    match environment.as_str() {
        "development" => from_filename(".env.dev").ok(),
        "production" => from_filename(".env.prod").ok(),
        _ => dotenv().ok(),
    };
    var(variable_to_get).ok()
}
