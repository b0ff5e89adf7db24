use anyhow::Result;

use crate::ai::chat::{Domain, Model};
use crate::ai::prompt::compose;

pub fn run(model: Model, domain: Domain, text: &str) -> Result<()> {
    let prompt = compose(model.id(), domain, text)?;
    println!("{}", prompt);
    Ok(())
}
