use crate::domain::transaction::AuthTransactionResponse;
use std::fmt::Display;

pub fn render_transaction(rsp: &AuthTransactionResponse) -> String {
    format!(
        r#"<html>
<head>
<title>View Transaction</title>
</head>
<body>
    <h1>View Transaction - {tran_id}</h1>
    <p><b>Success:</b>{success}</p>
    <p><b>ResultText:</b>{result_text}</p>
    <p><b>Amount (cents):</b>{amount}</p>
    <p><b>UserID:</b>{user_id}</p>
    <p><b>Authorized:</b>{authorized}</p>
</body>
</html>"#,
        tran_id = escape(&rsp.transaction_id),
        success = rsp.success,
        result_text = escape(&rsp.result_text),
        amount = rsp.amount,
        user_id = escape(&rsp.user_id),
        authorized = rsp.authorized,
    )
}

pub fn render_error(err: &impl Display) -> String {
    format!(
        r#"<html>
<head>
<title>View Transaction</title>
</head>
<body>
    <p>Error:{}</p>
</body>
</html>"#,
        escape(&err.to_string())
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
