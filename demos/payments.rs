//! Example walking through the payment operations against the sandbox

use daraja::{
    B2bCommand, B2bRequest, B2cCommand, B2cRequest, C2bRequest, DarajaClient, Environment,
    RegisterUrlRequest, ResponseType, StkPushRequest, TransactionType,
};

const CONSUMER_KEY: &str = "nF4OwB2XiuYZwmdMz3bovnzw2qMls1b7";
const CONSUMER_SECRET: &str = "biIImmaAX9dYD4Pw";
const SHORT_CODE_1: &str = "601376";
const SHORT_CODE_2: &str = "600000";
const LIPA_NA_MPESA: &str = "174379";
const LIPA_NA_MPESA_KEY: &str = "bfb279f9aa9bdbcf158e97dd71a467cd2e0c893059b10f78e6b72ada1ed2c919";
const INITIATOR_NAME: &str = "apitest376";
// Produced once on the Daraja portal for the operator password.
const SEC_CREDENTIAL: &str = "fqW2kW0hNOoeSbh+sd0qrSfFwAHJcxy1VlCqPGuu2MtRYPITI35CQApGPg2mE8d9";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = DarajaClient::new(Environment::Sandbox, CONSUMER_KEY, CONSUMER_SECRET)?;

    println!("--- MPESA URL registration running ---");
    let request = RegisterUrlRequest::new(
        SHORT_CODE_1,
        ResponseType::Cancelled,
        "https://www.aio.co.ke/confirm",
        "https://www.aio.co.ke/validate",
    )?;
    let response = client.register_url(&request).await?;
    if response.get("errorMessage").is_some() {
        println!("An error occurred during registration of urls");
    }
    println!("{}", response);
    println!("--- MPESA URL registration done ---");

    println!("--- MPESA c2b running ---");
    let request = C2bRequest::new(
        SHORT_CODE_1,
        TransactionType::CustomerPayBillOnline,
        100,
        "0705867162",
        "account-1",
    )?;
    let c2b = client.c2b(&request).await?;
    println!("{}", c2b);
    println!("--- MPESA c2b done running ---");

    println!("--- MPESA b2c running ---");
    let party_b = "254705867162";
    let request = B2cRequest::new(
        INITIATOR_NAME,
        SEC_CREDENTIAL,
        B2cCommand::BusinessPayment,
        100,
        SHORT_CODE_1,
        party_b,
        format!("Deposit to {}", party_b),
        "https://www.aio.co.ke/queue/",
        "https://www.aio.co.ke/result/",
    )?;
    let b2c = client.b2c(&request).await?;
    println!("{}", b2c);
    println!("--- MPESA done running b2c ---");

    println!("--- MPESA b2b running ---");
    let request = B2bRequest::new(
        INITIATOR_NAME,
        SEC_CREDENTIAL,
        B2bCommand::BusinessBuyGoods,
        100,
        SHORT_CODE_1,
        SHORT_CODE_2,
        "account-1",
        format!("Deposit to {}", SHORT_CODE_2),
        "https://www.aio.co.ke/queue/",
        "https://www.aio.co.ke/result/",
    )?;
    let b2b = client.b2b(&request).await?;
    println!("{}", b2b);
    println!("--- MPESA b2b done running ---");

    println!("--- MPESA stk push running ---");
    let request = StkPushRequest::new(
        LIPA_NA_MPESA,
        LIPA_NA_MPESA_KEY,
        100,
        "0705867162",
        "https://www.aio.co.ke/queue/",
        "account-1",
        "Deposit from 254705867162",
    )?;
    let stk = client.stk_push(&request).await?;
    println!("{}", stk);
    println!("--- MPESA stk done running ---");

    Ok(())
}
