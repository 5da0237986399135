/// Tables created by the initial schema, in drop order (children first).
pub const SCHEMA_TABLES: &[&str] = &[
    "authentication_user_password",
    "authentication_reset_password_token",
    "authorization_role_user",
    "authorization_role_permission",
    "authorization_permission",
    "authorization_role",
    "user_simple",
    "configuration",
];

pub mod seed {

    pub const ADMIN_ROLE: &str = "ADMIN";

    /// (name, type) pairs seeded into `authorization_permission`.
    pub const PERMISSIONS: &[(&str, &str)] = &[
        ("authorization", "page"),
        ("users", "page"),
        ("authorization", "read"),
        ("authorization", "write"),
        ("authentication", "read"),
        ("authentication", "write"),
        ("user", "read"),
        ("users", "read"),
        ("users", "write"),
        ("user", "write"),
    ];

    pub const CONFIGURATION: &[(&str, &str)] = &[
        (super::config_keys::RESET_PASSWORD_EXPIRATION, "24h"),
        (super::config_keys::CREATE_PASSWORD_EXPIRATION, "24h"),
        (super::config_keys::JWT_EXPIRATION, "24h"),
        (
            super::config_keys::JWT_SECRET,
            super::config_keys::PLACEHOLDER_JWT_SECRET,
        ),
        (super::config_keys::SALT_ROUNDS, "12"),
    ];
}

pub mod config_keys {

    pub const RESET_PASSWORD_EXPIRATION: &str = "RESET_PASSWORD_EXPIRATION";

    pub const CREATE_PASSWORD_EXPIRATION: &str = "CREATE_PASSWORD_EXPIRATION";

    pub const JWT_EXPIRATION: &str = "JWT_EXPIRATION";

    pub const JWT_SECRET: &str = "JWT_SECRET";

    pub const SALT_ROUNDS: &str = "SALT_ROUNDS";

    /// Seeded value of `JWT_SECRET`. Deployments are expected to replace it.
    pub const PLACEHOLDER_JWT_SECRET: &str = "change me in production";
}

pub mod limits {

    /// Column width of the password hash columns.
    pub const PASSWORD_HASH_MAX_LEN: usize = 60;

    pub const RESET_TOKEN_BYTES: usize = 32;

    pub const DEFAULT_SALT_ROUNDS: u32 = 12;

    pub const DEFAULT_RESET_PASSWORD_EXPIRATION_HOURS: i64 = 24;
}
