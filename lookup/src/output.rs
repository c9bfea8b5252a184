use dns::Message;

/// Status line followed by one line per answer record.
pub fn render(response: &Message) -> String {
    let header = response.header();

    let mut lines = vec![format!(
        ";; status: {}, id: {}, answers: {}",
        header.rcode_name(),
        header.id,
        response.answers().len()
    )];
    for rr in response.answers() {
        lines.push(rr.to_string());
    }

    lines.join("\n")
}
