use std::io;

use twilio_sms::{Credentials, RawPhoneNumber, TwilioClient};

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
    let host = RawPhoneNumber::new(required_env("TWILIO_FROM")?)?;
    let peer = RawPhoneNumber::new(required_env("TWILIO_TO")?)?;

    let client = TwilioClient::new(Credentials::new(sid, token)?);
    let thread = client.get_thread(&host, &peer).await?;

    for message in thread.iter() {
        println!(
            "[{}] {} -> {}: {}",
            message.date_sent, message.from, message.to, message.body
        );
    }

    Ok(())
}
