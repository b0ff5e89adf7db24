use anyhow::{Result, bail};

use crate::ai::chat::{ChatBuilder, Domain, Model};
use crate::core::AppConfig;

pub async fn run(config: AppConfig, model: Model, domain: Domain, text: &str) -> Result<()> {
    let mut chat = ChatBuilder::from_config(&config)
        .model(model)
        .domain(domain)
        .build();
    chat.session.lock();

    if let Some(caveat) = model.caveat() {
        eprintln!("{}", caveat);
    }

    let result = chat.next_msg(text).await?;
    if !result.success {
        bail!("{}", result.text);
    }
    println!("{}", result.text);

    Ok(())
}
