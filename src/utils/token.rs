use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use entity::company_license::Party;
use rand_core::{OsRng, RngCore};

/// Fresh random session secret. Never contains a `.`.
pub fn new_token() -> String {
    let mut buf = [0u8; 32];
    OsRng.fill_bytes(&mut buf);
    format!("tok_{}", URL_SAFE_NO_PAD.encode(buf))
}

/// Argon2 PHC string for a password or session secret.
pub fn hash_secret(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok())
}

fn party_tag(party: Party) -> &'static str {
    match party {
        Party::Buyer => "buyer",
        Party::Supplier => "supplier",
    }
}

/// Bearer token handed to the client: base64("<party>.<id>.<secret>").
pub fn construct_token(party: Party, id: i32, secret: &str) -> String {
    STANDARD.encode(format!("{}.{id}.{secret}", party_tag(party)))
}

pub fn extract_token_parts(token: &str) -> Option<(Party, i32, String)> {
    let decoded = STANDARD.decode(token).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let mut parts = decoded.splitn(3, '.');
    let party = match parts.next()? {
        "buyer" => Party::Buyer,
        "supplier" => Party::Supplier,
        _ => return None,
    };
    let id = parts.next()?.parse().ok()?;
    let secret = parts.next()?;
    if secret.is_empty() {
        return None;
    }
    Some((party, id, secret.to_string()))
}

/// Reference numbers look like `TND-2025-AB12CD34`.
pub fn new_reference_number(year: i32) -> String {
    const ALPHABET: [char; 32] = [
        '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K',
        'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    ];
    format!("TND-{year}-{}", nanoid::nanoid!(8, &ALPHABET))
}
