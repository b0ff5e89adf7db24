mod test_utils;

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use domainbot::ai::chat::{Domain, Model, ResetPolicy, Speaker, Tier};
    use domainbot::ai::prompt::{self, Prompt};
    use domainbot::cli::chat::{ChatEvent, handle_event};
    use domainbot::ollama::NO_VALID_RESPONSE;

    use crate::test_utils::{fake_endpoint, test_chat};

    #[test]
    fn it_renders_prompt_templates() -> Result<()> {
        let templates = prompt::templates();
        let actual = templates.render(
            &Prompt::from(Tier::Minimal).to_string(),
            &json!({"domain": "Arts", "user_text": "Who was Monet?"}),
        )?;
        assert!(actual.contains("expert in Arts"));
        assert!(actual.contains("Question: Who was Monet?"));
        Ok(())
    }

    #[test]
    fn it_requires_all_template_fields() {
        let templates = prompt::templates();
        let result = templates.render(
            &Prompt::FullExpert.to_string(),
            &json!({"domain": "Arts"}),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn it_chats_with_the_endpoint() -> Result<()> {
        let (server, mock) = fake_endpoint(r#"{"response": "Paris"}"#).await;
        let mut chat = test_chat(&server.url(), Model::Gemma3, Domain::Science);

        let result = chat.next_msg("What is the capital of France?").await?;

        mock.assert_async().await;
        assert!(result.success);
        assert_eq!(result.text, "Paris");
        Ok(())
    }

    #[tokio::test]
    async fn it_degrades_when_reply_is_missing() -> Result<()> {
        let (server, mock) = fake_endpoint("{}").await;
        let mut chat = test_chat(&server.url(), Model::Qwen3, Domain::It);

        let result = chat.next_msg("What is DNS?").await?;

        mock.assert_async().await;
        assert_eq!(result.text, NO_VALID_RESPONSE);
        assert_eq!(result.raw, Some(json!({})));
        let turns = chat.session.transcript().turns();
        assert_eq!(turns[1].text, NO_VALID_RESPONSE);
        Ok(())
    }

    #[tokio::test]
    async fn it_surfaces_unreachable_endpoint_inline() -> Result<()> {
        let mut chat = test_chat("http://127.0.0.1:1", Model::TinyLlama, Domain::Medical);

        let result = chat.next_msg("What is insulin?").await?;

        assert!(!result.success);
        assert!(result.text.starts_with("[Error: "));

        let turns = chat.session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[0].text, "What is insulin?");
        assert_eq!(turns[1].speaker, Speaker::Bot);
        assert_eq!(turns[1].text, result.text);
        Ok(())
    }

    #[tokio::test]
    async fn it_keeps_the_transcript_in_order_across_exchanges() -> Result<()> {
        let (server, mock) = fake_endpoint(r#"{"response": "ok"}"#).await;
        let mut chat = test_chat(&server.url(), Model::Gemma3, Domain::Arts);

        for i in 0..3 {
            chat.next_msg(&format!("question {}", i)).await?;
        }

        mock.assert_async().await;
        let turns = chat.session.transcript().turns();
        assert_eq!(turns.len(), 6);
        for i in 0..3 {
            assert_eq!(turns[i * 2].text, format!("question {}", i));
            assert_eq!(turns[i * 2 + 1].text, "ok");
        }
        Ok(())
    }

    #[tokio::test]
    async fn it_switches_domain_mid_conversation() -> Result<()> {
        let (server, mock) = fake_endpoint(r#"{"response": "ok"}"#).await;
        let mut chat = test_chat(&server.url(), Model::Gemma3, Domain::Science);
        assert_eq!(chat.session.reset_policy(), ResetPolicy::KeepTranscript);

        handle_event(&mut chat, ChatEvent::Send(String::from("first"))).await?;
        handle_event(&mut chat, ChatEvent::Reset).await?;
        handle_event(&mut chat, ChatEvent::SelectModel(Model::Qwen3)).await?;
        handle_event(&mut chat, ChatEvent::SelectDomain(Domain::Arts)).await?;
        handle_event(&mut chat, ChatEvent::Start).await?;
        handle_event(&mut chat, ChatEvent::Send(String::from("second"))).await?;

        mock.assert_async().await;
        assert_eq!(chat.session.model(), Model::Qwen3);
        assert_eq!(chat.session.domain(), Domain::Arts);
        assert_eq!(chat.session.transcript().len(), 4);
        Ok(())
    }
}
