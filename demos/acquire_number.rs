use std::io;

use twilio_sms::{CallbackUrl, Credentials, NumberSearch, TwilioClient};

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
    let sms_url = required_env("TWILIO_SMS_URL")?;

    let mut search = NumberSearch::default();
    if let Ok(region) = std::env::var("TWILIO_REGION") {
        search = search.in_region(region);
    }

    let client = TwilioClient::builder(Credentials::new(sid, token)?)
        .sms_url(CallbackUrl::new(sms_url)?)
        .number_search(search)
        .build()?;

    let number = client.acquire_number().await?;
    println!(
        "purchased: {} (sms: {}, mms: {}, voice: {})",
        number.phone_number,
        number.capabilities.sms,
        number.capabilities.mms,
        number.capabilities.voice
    );

    Ok(())
}
