//! サーバサイドで描画するHTML断片

use crate::auth::middleware::CurrentUser;

const STYLE: &str = r#"
body {
  font-family: sans-serif;
  max-width: 500px;
  margin: 0 auto;
  padding: 1rem;
}
.form-group {
  margin-bottom: 1rem;
}
label {
  display: block;
  margin-bottom: 0.5rem;
}
input {
  width: 100%;
  padding: 0.5rem;
  box-sizing: border-box;
}
button {
  background: #4CAF50;
  color: white;
  border: none;
  padding: 0.5rem 1rem;
  cursor: pointer;
}
ul.circulars li {
  margin-bottom: 0.5rem;
}
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// ユーザー入力をHTMLへ埋め込む前のエスケープ
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// ログインフォーム
pub fn login_page() -> String {
    layout(
        "組ぼーど - ログイン",
        r#"<h1>組ぼーど - ログイン</h1>
<form action="/auth/login" method="post">
  <div class="form-group">
    <label for="email">メールアドレス</label>
    <input type="email" id="email" name="email" required>
  </div>
  <div class="form-group">
    <label for="password">パスワード</label>
    <input type="password" id="password" name="password" required>
  </div>
  <button type="submit">ログイン</button>
</form>
<p>アカウントをお持ちでない方は<a href="/auth/register">こちら</a>から登録できます。</p>"#,
    )
}

/// 登録フォーム
pub fn register_page() -> String {
    layout(
        "組ぼーど - 登録",
        r#"<h1>組ぼーど - ユーザー登録</h1>
<form action="/auth/register" method="post">
  <div class="form-group">
    <label for="name">お名前</label>
    <input type="text" id="name" name="name" required>
  </div>
  <div class="form-group">
    <label for="email">メールアドレス</label>
    <input type="email" id="email" name="email" required>
  </div>
  <div class="form-group">
    <label for="address">住所</label>
    <input type="text" id="address" name="address">
  </div>
  <div class="form-group">
    <label for="password">パスワード</label>
    <input type="password" id="password" name="password" required>
  </div>
  <button type="submit">登録</button>
</form>
<p>すでにアカウントをお持ちの方は<a href="/auth/login">こちら</a>からログインできます。</p>"#,
    )
}

/// ホームページ。回覧板の一覧機能は未実装のため固定の項目を表示している。
pub fn home_page(user: &CurrentUser) -> String {
    const PLACEHOLDER_CIRCULARS: [&str; 3] = [
        "ゴミ収集日程の変更について",
        "夏祭りのお知らせ",
        "防災訓練のご案内",
    ];

    let items: String = PLACEHOLDER_CIRCULARS
        .iter()
        .map(|title| format!("  <li>{title}</li>\n"))
        .collect();

    let body = format!(
        r#"<h1>組ぼーど</h1>
<p>ようこそ、{name}さん</p>
<h2>回覧板</h2>
<ul class="circulars">
{items}</ul>
<form action="/auth/logout" method="post">
  <button type="submit">ログアウト</button>
</form>"#,
        name = escape_html(&user.name),
    );

    layout("組ぼーど", &body)
}
