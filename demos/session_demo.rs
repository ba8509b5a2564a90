// Example demonstrating the PitchCraft session workflow
// Runs against the in-memory testing preset, so no API key is needed.
// Set PITCHCRAFT_DEMO_DURABLE=1 to use the durable data directory and real Gemini instead.

use pitchcraft::{AppConfig, PitchSession, PitchStyle, ProviderConfig, ProviderFactory, CREDIT_PACK_SIZE};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let factory = ProviderFactory::new(AppConfig::load());
    let durable = std::env::var("PITCHCRAFT_DEMO_DURABLE").is_ok();

    let provider = if durable {
        factory.get_instance(Some(ProviderConfig::default()))?
    } else {
        Arc::new(factory.create_testing_provider()?)
    };

    println!("🎤 PitchCraft demo ({:?})", provider.config());
    let mut session = PitchSession::new(provider);

    let user = match session.restore().await? {
        Some(user) => user,
        None => session.login(Some("Demo Founder".to_string())).await?,
    };
    println!("👤 Logged in as {} with {} credits", user.name, session.credits());
    println!();

    let idea = "A mobile app that matches dog owners for shared walks";

    println!("Step 1: Generate");
    println!("─────────────────");
    let pitch = session.generate_pitch(idea, PitchStyle::ElevatorPitch).await?;
    println!("{}\n", pitch.pitch);

    println!("Step 2: Analyze");
    println!("─────────────────");
    println!("{}\n", session.analyze_pitch(&pitch.pitch).await?);

    println!("Step 3: Marketing");
    println!("─────────────────");
    println!("{}\n", session.suggest_marketing(idea).await?);

    println!("💳 Credits left: {}", session.credits());
    let balance = session.buy_credits(CREDIT_PACK_SIZE).await?;
    println!("💳 After buying a pack: {}", balance);

    println!("📚 History:");
    for saved in session.history() {
        println!("  {} [{}] {}", saved.id, saved.style, saved.input);
    }

    if !durable {
        session.logout().await?;
    }

    Ok(())
}
