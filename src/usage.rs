use std::error::Error;
use std::time::Instant;

use cipherkit::encoding::bytes_to_base64;
use cipherkit::{
    Aes, AesOptions, Blowfish, BlowfishParameters, DecryptionParameters, EncryptionParameters,
    KeyGenerator, Rsa, RsaDecryptionParameters, RsaEncryptionParameters,
};
use serde::Serialize;

const DATA_TO_ENCRYPT: &str = "Hello World";

fn print_result<T: Serialize>(label: &str, result: &T) -> Result<(), Box<dyn Error>> {
    println!("{label}:\n{}\n", serde_json::to_string_pretty(result)?);
    Ok(())
}

// Walks through the hex, Base64 and generated-IV AES paths
pub async fn aes_usage(
    aes: &Aes,
    keys: &KeyGenerator,
    key_bits: u32,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    println!("------- AES demo started -------");

    let secret = keys.generate_aes_secret_key(key_bits)?;

    let hex_iv = keys.generate_hex_iv()?;
    let encrypted = aes.encrypt_to_hex_string(&EncryptionParameters::new(
        DATA_TO_ENCRYPT,
        secret.clone(),
        hex_iv.clone(),
    ));
    print_result("Hex encryption", &encrypted)?;

    let decrypted = aes.decrypt_from_hex_string(&DecryptionParameters::new(
        encrypted.encrypted_data.unwrap_or_default(),
        secret.clone(),
        hex_iv,
    ));
    print_result("Hex decryption", &decrypted)?;

    let base64_iv = keys.generate_base64_iv()?;
    let encrypted = aes
        .encrypt_async(
            EncryptionParameters::new(DATA_TO_ENCRYPT, secret.clone(), base64_iv.clone()),
            AesOptions::base64(),
        )
        .await;
    print_result("Base64 encryption", &encrypted)?;

    let decrypted = aes
        .decrypt_async(
            DecryptionParameters::new(
                encrypted.encrypted_data.unwrap_or_default(),
                secret,
                base64_iv,
            ),
            AesOptions::base64(),
        )
        .await;
    print_result("Base64 decryption", &decrypted)?;

    // A 32 character passphrase doubles as a 256-bit key
    let passphrase = "correct horse battery staple 256";
    let encrypted = aes.encrypt_with_generated_iv(DATA_TO_ENCRYPT, passphrase);
    print_result("Generated IV encryption", &encrypted)?;

    let decrypted = aes.decrypt_with_generated_iv(
        encrypted.encrypted_data.as_deref().unwrap_or_default(),
        passphrase,
        encrypted.iv.as_deref().unwrap_or_default(),
    );
    print_result("Generated IV decryption", &decrypted)?;

    tracing::info!("aes demo took: {:?}", start.elapsed());
    println!("------- AES demo ended -------");
    Ok(())
}

// Raw-key strict calls first, then the Base64 structured pair
pub fn blowfish_usage(
    blowfish: &Blowfish,
    keys: &KeyGenerator,
    key_bits: u32,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    println!("------- Blowfish demo started -------");

    let key = keys.generate_blowfish_key(key_bits)?;
    let plain_text = "Hello, Blowfish!";
    println!("Original text: {plain_text}");

    let encrypted = blowfish.encrypt_str(plain_text, &key)?;
    println!("Encrypted text (base64): {encrypted}");
    let decrypted = blowfish.decrypt_str(&encrypted, &key)?;
    println!("Decrypted text: {decrypted}\n");

    let secret = bytes_to_base64(&key);
    let encrypted = blowfish.encrypt(&BlowfishParameters::new(DATA_TO_ENCRYPT, secret.clone()));
    print_result("Structured encryption", &encrypted)?;

    let decrypted = blowfish.decrypt(&BlowfishParameters::new(
        encrypted.encrypted_data.unwrap_or_default(),
        secret,
    ));
    print_result("Structured decryption", &decrypted)?;

    tracing::info!("blowfish demo took: {:?}", start.elapsed());
    println!("------- Blowfish demo ended -------");
    Ok(())
}

// Generates a key pair, then encrypts and decrypts through the worker pool
pub async fn rsa_usage(rsa: &Rsa, modulus_bits: u32) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    println!("------- RSA demo started -------");

    let pair = rsa.generate_key_pair(modulus_bits).await?;
    tracing::info!("rsa key generation took: {:?}", start.elapsed());
    println!("Public key:\n{}", pair.public_key);

    let encrypted = rsa
        .encrypt(&RsaEncryptionParameters {
            data_to_encrypt: "Hello, RSA Encryption!".to_string(),
            public_key: pair.public_key.clone(),
        })
        .await;
    if let Some(data) = &encrypted.encrypted_data {
        println!("Encrypted data (base64): {}\n", bytes_to_base64(data));
    }
    if encrypted.has_error {
        print_result("RSA encryption", &encrypted)?;
    }

    let decrypted = rsa
        .decrypt(&RsaDecryptionParameters {
            data_to_decrypt: encrypted.encrypted_data.unwrap_or_default(),
            private_key: pair.private_key,
        })
        .await;
    print_result("RSA decryption", &decrypted)?;

    tracing::info!("rsa demo took: {:?}", start.elapsed());
    println!("------- RSA demo ended -------");
    Ok(())
}
