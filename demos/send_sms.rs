use std::io;

use twilio_sms::{Credentials, MessageBody, RawPhoneNumber, TwilioClient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sid = required_env("TWILIO_ACCOUNT_SID")?;
    let token = required_env("TWILIO_AUTH_TOKEN")?;
    let from = required_env("TWILIO_FROM")?;
    let to = required_env("TWILIO_TO")?;
    let message = std::env::var("TWILIO_MESSAGE")
        .unwrap_or_else(|_| "Hello from the twilio-sms demo.".to_owned());

    let client = TwilioClient::builder(Credentials::new(sid, token)?)
        .default_from(RawPhoneNumber::new(from)?)
        .build()?;

    let sent = client
        .send(RawPhoneNumber::new(to)?, MessageBody::new(message)?)
        .await?;
    println!("sid: {}, status: {}", sent.sid, sent.status);

    Ok(())
}
