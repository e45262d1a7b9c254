//! Built-in commands every Herald bot ships with.

use anyhow::{bail, Result};
use serde_json::json;

use herald_commands::{
    handler_fn, register_help, Arguments, CommandDispatcher, Coercion, Signature,
};
use herald_config::HeraldConfig;
use herald_core::{MessageLike, Reply};

const MAX_REPEAT: i64 = 10;

/// Build a dispatcher with `echo`, `add`, `repeat` and `help` registered.
pub fn build_dispatcher<M>(config: &HeraldConfig) -> Result<CommandDispatcher<M>>
where
    M: MessageLike + Reply + Clone + Send + Sync + 'static,
{
    let mut dispatcher =
        CommandDispatcher::new().with_error_reporting(config.commands.print_command_errors);

    dispatcher.register(
        "echo",
        Signature::new().message().param("text"),
        handler_fn(|message: M, args: Arguments| async move {
            let text = args.str("text").unwrap_or_default().to_string();
            message.reply(&text).await
        })
        .with_doc("Say the text back.\n\nQuote it to keep the spaces."),
    )?;

    dispatcher.register(
        "add",
        Signature::new()
            .message()
            .typed("a", Coercion::integer())
            .typed("b", Coercion::integer()),
        handler_fn(|message: M, args: Arguments| async move {
            let a: i64 = args.parse("a")?;
            let b: i64 = args.parse("b")?;
            let Some(sum) = a.checked_add(b) else {
                bail!("{a} + {b} overflows");
            };
            message.reply(&sum.to_string()).await
        })
        .with_doc("Add two whole numbers."),
    )?;

    dispatcher.register(
        "repeat",
        Signature::new()
            .message()
            .param("text")
            .optional_typed("times", json!(2), Coercion::integer()),
        handler_fn(|message: M, args: Arguments| async move {
            let text = args.str("text").unwrap_or_default().to_string();
            let times: i64 = args.parse("times")?;
            if !(1..=MAX_REPEAT).contains(&times) {
                bail!("times must be between 1 and {MAX_REPEAT}, got {times}");
            }
            let line = vec![text; times as usize].join(" ");
            message.reply(&line).await
        })
        .with_doc(format!("Say the text several times (at most {MAX_REPEAT}).")),
    )?;

    register_help(&mut dispatcher, "help", &config.commands.prefix)?;

    Ok(dispatcher)
}
