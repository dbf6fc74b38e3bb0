//! CLI tool for storefront card checks.
//!
//! # Usage
//!
//! ```bash
//! # Validate a card with the checkout rules
//! cardcheck validate --brand visa "4532 0151 1283 0366" "JOHN DOE" 12/30 123
//!
//! # Same card with the saved-card rules, JSON output
//! cardcheck validate --brand visa --mode lenient -o json 4532015112830366 JD 01/20 123
//!
//! # Shipping quote for a pincode
//! cardcheck shipping 560001
//!
//! # Format form input
//! cardcheck format expiry 1230
//!
//! # Generate test card numbers
//! cardcheck generate --brand rupay --count 5
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::process::ExitCode;
use storefront_cards::{
    checkout, detect, expiry, format, generate, luhn, mask, validate_card, CardBrand, CardInput,
    ValidationMode,
};

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Storefront payment card checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a full card form
    Validate {
        /// Card brand selected in the form
        #[arg(short, long)]
        brand: BrandArg,

        /// Card number (spaces allowed)
        number: String,

        /// Name on the card
        holder_name: String,

        /// Expiry as MM/YY
        expiry: String,

        /// Three-digit CVV
        cvv: String,

        /// Rule set to apply
        #[arg(short, long, default_value = "strict")]
        mode: ModeArg,

        /// Accept any two digits as the expiry month
        #[arg(long)]
        parity_month: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if 16 digits pass the Luhn algorithm
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Suggest a brand from a (partial) card number
    Detect {
        /// Card number or its first digits
        card_number: String,
    },

    /// Format form input the way the payment form does
    Format {
        /// Which field the input belongs to
        #[arg(value_enum)]
        field: FormatField,

        /// Raw input
        input: String,
    },

    /// Parse an MM/YY expiry
    Expiry {
        /// Expiry date
        date: String,

        /// Accept any two digits as the month
        #[arg(long)]
        parity_month: bool,
    },

    /// Quote shipping for a pincode
    Shipping {
        /// Six-digit pincode
        pincode: String,
    },

    /// Mask a card number, keeping the last four digits
    Mask {
        /// Card number to mask
        card_number: String,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card brand to generate
        #[arg(short, long, default_value = "visa")]
        brand: BrandArg,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output formatted (with spaces)
        #[arg(short, long)]
        formatted: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Strict,
    Lenient,
}

impl From<ModeArg> for ValidationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Strict => ValidationMode::Strict,
            ModeArg::Lenient => ValidationMode::Lenient,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BrandArg {
    Visa,
    Mastercard,
    Rupay,
}

impl From<BrandArg> for CardBrand {
    fn from(arg: BrandArg) -> Self {
        match arg {
            BrandArg::Visa => CardBrand::Visa,
            BrandArg::Mastercard => CardBrand::Mastercard,
            BrandArg::Rupay => CardBrand::RuPay,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatField {
    Number,
    Expiry,
    Cvv,
    Pincode,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            brand,
            number,
            holder_name,
            expiry,
            cvv,
            mode,
            parity_month,
            output,
        } => {
            let input = CardInput::new(brand.into(), number, holder_name, expiry, cvv);
            cmd_validate(&input, mode.into(), parity_month, output)
        }
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Detect { card_number } => cmd_detect(&card_number),
        Commands::Format { field, input } => {
            cmd_format(field, &input);
            ExitCode::SUCCESS
        }
        Commands::Expiry { date, parity_month } => cmd_expiry(&date, parity_month),
        Commands::Shipping { pincode } => {
            println!("{}", checkout::shipping_cost(&pincode));
            ExitCode::SUCCESS
        }
        Commands::Mask { card_number } => cmd_mask(&card_number),
        Commands::Generate {
            brand,
            count,
            formatted,
        } => {
            cmd_generate(brand.into(), count, formatted);
            ExitCode::SUCCESS
        }
    }
}

fn cmd_validate(
    input: &CardInput,
    mode: ValidationMode,
    parity_month: bool,
    output: OutputFormat,
) -> ExitCode {
    let rules = mode.rules().with_month_range(!parity_month);

    match validate_card(input, &rules) {
        Ok(card) => {
            match output {
                OutputFormat::Text => {
                    println!("Valid: yes");
                    println!("Brand: {}", card.brand().name());
                    println!("Last Four: {}", card.last_four());
                    println!("Masked: {}", card.masked());
                    println!("Expiry: {}", card.expiry());
                }
                OutputFormat::Json => {
                    let body = json!({
                        "valid": true,
                        "mode": mode,
                        "brand": card.brand(),
                        "last_four": card.last_four(),
                        "masked": card.masked(),
                        "expiry": card.expiry().to_string(),
                    });
                    println!("{body:#}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            match output {
                OutputFormat::Text => {
                    println!("Valid: no");
                    println!("Field: {}", e.field());
                    println!("Error: {}", e);
                }
                OutputFormat::Json => {
                    let body = json!({
                        "valid": false,
                        "mode": mode,
                        "kind": e.kind(),
                        "field": e.field(),
                        "error": e.to_string(),
                    });
                    println!("{body:#}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    if luhn::validate_str(&format::strip_whitespace(card_number)) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_detect(card_number: &str) -> ExitCode {
    match detect::detect_brand_str(card_number) {
        Some(brand) => {
            println!("Detected Brand: {}", brand.name());
            println!("Expected Prefix: {}", brand.expected_prefix());
            ExitCode::SUCCESS
        }
        None => {
            println!("Detected Brand: Unknown");
            ExitCode::FAILURE
        }
    }
}

fn cmd_format(field: FormatField, input: &str) {
    let formatted = match field {
        FormatField::Number => format::format_card_number(input),
        FormatField::Expiry => format::format_expiry_input(input),
        FormatField::Cvv => format::format_cvv_input(input),
        FormatField::Pincode => format::format_pincode_input(input),
    };
    println!("{}", formatted);
}

fn cmd_expiry(date: &str, parity_month: bool) -> ExitCode {
    match expiry::parse_expiry_with(date, !parity_month) {
        Ok(exp) => {
            let today = expiry::today();
            println!("Valid: yes");
            println!("Month: {:02}", exp.month());
            println!("Year: {}", exp.year());
            if exp.is_expired_at(today) {
                println!("Status: Expired");
            } else {
                println!("Months Until Expiry: {}", exp.months_until_expiry_at(today));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_mask(card_number: &str) -> ExitCode {
    let last4 = mask::last_four_from_string(card_number);
    if last4.is_empty() {
        eprintln!("Error: Card number too short");
        return ExitCode::FAILURE;
    }
    println!("{}", mask::mask_last4(&last4));
    ExitCode::SUCCESS
}

fn cmd_generate(brand: CardBrand, count: usize, formatted: bool) {
    for _ in 0..count {
        let card = generate::generate_card(brand);
        if formatted {
            println!("{}", format::format_card_number(&card));
        } else {
            println!("{}", card);
        }
    }
}
