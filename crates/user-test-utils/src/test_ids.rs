//! Fixed test data for deterministic tests

/// HS256 secret used by every test server.
pub const TEST_JWT_SECRET: &str = "user-service-test-secret-do-not-use-in-production";

/// A secret that differs from [`TEST_JWT_SECRET`], for forged tokens.
pub const WRONG_JWT_SECRET: &str = "some-other-secret-that-is-also-32-bytes-long";

/// Credentials and display name of a test account.
#[derive(Debug, Clone, Copy)]
pub struct TestAccount {
    pub username: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

pub const ALF: TestAccount = TestAccount {
    username: "alf",
    password: "melmac",
    name: "alf",
};

pub const ET: TestAccount = TestAccount {
    username: "et",
    password: "micasa",
    name: "et",
};

pub const YODA: TestAccount = TestAccount {
    username: "yoda",
    password: "bewater",
    name: "Yoda",
};
