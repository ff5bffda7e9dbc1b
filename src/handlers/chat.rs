use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::identity;
use crate::state::AppState;

/// Fallback when neither a forwarded header nor a peer address is
/// available (e.g. in-process test requests).
const FALLBACK_ADDR: &str = "0.0.0.0";

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub message: String,
}

/// Resolves the originating client address: first entry of
/// `X-Forwarded-For` if present, else the direct peer address.
fn client_addr(req: &HttpRequest) -> String {
    if let Some(forwarded) = req.headers().get("X-Forwarded-For") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| FALLBACK_ADDR.to_string())
}

pub async fn list_messages(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let store = state.store.clone();
    let log = web::block(move || store.list())
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    Ok(HttpResponse::Ok().json(log))
}

pub async fn post_message(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<PostMessageRequest>,
) -> AppResult<HttpResponse> {
    let user_id = identity::pseudonym_id(&client_addr(&req));

    let store = state.store.clone();
    let text = body.into_inner().message;
    let entry = web::block(move || store.append(&text, &user_id))
        .await
        .map_err(|e| AppError::Storage(e.to_string()))??;

    info!(id = entry.id, user = %entry.user, "message appended");
    Ok(HttpResponse::Ok().json(json!({ "ok": true, "entry": entry })))
}

pub async fn chat_page(req: HttpRequest) -> HttpResponse {
    let user_id = identity::pseudonym_id(&client_addr(&req));
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(CHAT_PAGE.replace("__USER_ID__", &user_id))
}

pub async fn index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/chat"))
        .finish()
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

// Single-page poll-and-post UI. The 1000-character cap is client-side
// only; the server does not enforce a length limit.
const CHAT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">
<title>Chatboard</title>
<style>
  body{margin:0;background:#0c0c0c;color:#efefef;font-family:system-ui,sans-serif}
  .container{max-width:1000px;margin:1rem auto;padding:0 1rem}
  .panel{background:#151515;border:1px solid #222;border-radius:.75rem;overflow:hidden}
  .panel-header{padding:.85rem 1rem;border-bottom:1px solid #222;display:flex;justify-content:space-between}
  .user-id{color:#bbb;font-size:.9rem}
  .messages{max-height:60vh;overflow-y:auto;padding:.5rem .75rem;background:#101010}
  .msg{padding:.65rem .8rem;margin:.5rem 0;border-radius:.6rem;border:1px solid #222;background:#121212}
  .msg-meta{font-size:.8rem;color:#bbb;display:flex;gap:.5rem}
  .msg-author{color:#00c2ff;font-weight:600}
  .msg-text{line-height:1.4;word-wrap:break-word;white-space:pre-wrap}
  .composer{border-top:1px solid #222;background:#101010;padding:.75rem;display:flex;gap:.5rem}
  .input{flex:1;min-height:2.75rem;border-radius:.6rem;border:1px solid #333;padding:.55rem .7rem;background:#0c0c0c;color:#efefef}
  .btn{min-height:2.75rem;padding:.55rem .9rem;border-radius:.6rem;border:1px solid #333;background:#161616;color:#efefef;cursor:pointer;font-weight:600}
</style>
</head>
<body>
<main class="container">
  <div class="panel">
    <div class="panel-header"><strong>Open Chat</strong><span class="user-id">You are: <strong>User __USER_ID__</strong></span></div>
    <div class="messages" id="messages"></div>
    <div class="composer">
      <input id="msgInput" class="input" type="text" maxlength="1000" placeholder="Type and send">
      <button class="btn" onclick="sendMessage()">Send</button>
    </div>
  </div>
</main>
<script>
  const messagesEl=document.getElementById('messages');
  const inputEl=document.getElementById('msgInput');
  async function fetchMessages(){
    try{
      const res=await fetch('/api/chat');
      if(!res.ok)return;
      const data=await res.json();
      renderMessages(data.messages||[]);
    }catch(e){}
  }
  function renderMessages(msgs){
    messagesEl.innerHTML='';
    msgs.forEach(m=>{
      const div=document.createElement('div');
      div.className='msg';
      const meta=document.createElement('div');
      meta.className='msg-meta';
      meta.textContent='User '+m.user+' · '+new Date(m.timestamp).toLocaleString()+' · #'+m.id;
      const text=document.createElement('div');
      text.className='msg-text';
      text.textContent=m.message;
      div.appendChild(meta);
      div.appendChild(text);
      messagesEl.appendChild(div);
    });
    messagesEl.scrollTop=messagesEl.scrollHeight;
  }
  async function sendMessage(){
    const text=inputEl.value.trim();
    if(!text)return;
    try{
      const res=await fetch('/api/chat',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({message:text})});
      if(!res.ok)return;
      inputEl.value='';
      await fetchMessages();
    }catch(e){}
  }
  inputEl.addEventListener('keydown',e=>{if(e.key==='Enter')sendMessage()});
  fetchMessages();
  setInterval(fetchMessages,5000);
</script>
</body>
</html>"#;
