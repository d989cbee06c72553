use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::record::Record;
use crate::generation::{TextGenerator, generate_or_fallback};
use crate::processing::matcher::find_best_with_floor;

pub const GREETING: &str = "Hello! I'm here to answer your questions about the archive. Type 'exit' to end the conversation.";
pub const GOODBYE: &str = "Goodbye! Have a great day!";
pub const NO_MATCH_REPLY: &str =
    "I'm sorry, I couldn't find any relevant information to answer your question.";

/// Answers `question` from the best matching record, or returns
/// [`NO_MATCH_REPLY`] when the question is blank or nothing clears `floor`.
pub async fn answer_question<G>(
    question: &str,
    records: &[Record],
    generator: &G,
    floor: f64,
) -> String
where
    G: TextGenerator + ?Sized,
{
    let question = question.trim();
    if question.is_empty() {
        return NO_MATCH_REPLY.to_string();
    }

    match find_best_with_floor(question, records, floor) {
        Some(best) => generate_or_fallback(generator, &best.record.body, question).await,
        None => NO_MATCH_REPLY.to_string(),
    }
}

/// Interactive question loop. Ends on `exit` or end of input.
pub async fn run_chat<R, W, G>(
    input: R,
    mut output: W,
    records: &[Record],
    generator: &G,
    floor: f64,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    G: TextGenerator + ?Sized,
{
    output
        .write_all(format!("Chatbot: {GREETING}\n").as_bytes())
        .await?;

    let mut lines = input.lines();
    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            output
                .write_all(format!("Chatbot: {GOODBYE}\n").as_bytes())
                .await?;
            break;
        }

        let answer = answer_question(question, records, generator, floor).await;
        output
            .write_all(format!("Chatbot: {answer}\n").as_bytes())
            .await?;
    }

    output.flush().await
}
