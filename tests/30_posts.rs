mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn create_post_with_picture_and_toggle_like() -> Result<()> {
    let Some(server) = common::server_if_configured().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let (email, password, user) = common::register_user(&client, &server.base_url).await?;
    let user_id = user["id"].as_str().unwrap().to_string();
    let token = common::login_user(&client, &server.base_url, &email, &password).await?;

    // Create a post with an attached picture
    let picture_name = format!("pic-{}.png", &user_id[..8]);
    let form = reqwest::multipart::Form::new()
        .text("description", "hello from the integration suite")
        .text("location", "Testville")
        .part(
            "picture",
            reqwest::multipart::Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
                .file_name(picture_name.clone()),
        );
    let res = client
        .post(format!("{}/posts", server.base_url))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<serde_json::Value>().await?;
    let feed = body["data"].as_array().unwrap();
    let post = feed
        .iter()
        .find(|p| p["userId"] == serde_json::json!(user_id))
        .expect("created post should appear in the feed");
    let post_id = post["id"].as_str().unwrap().to_string();
    assert_eq!(post["picturePath"], serde_json::json!(picture_name));
    assert_eq!(post["location"], serde_json::json!("Testville"));

    // The stored file is served back under /assets
    let res = client
        .get(format!("{}/assets/{}", server.base_url, picture_name))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Like, then unlike: the pair restores the original state
    let like_url = format!("{}/posts/{}/like", server.base_url, post_id);
    let res = client.patch(&like_url).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let liked = res.json::<serde_json::Value>().await?;
    assert_eq!(liked["data"]["likes"][&user_id], serde_json::json!(true));

    let res = client.patch(&like_url).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let unliked = res.json::<serde_json::Value>().await?;
    assert!(unliked["data"]["likes"].get(&user_id).is_none());

    Ok(())
}

#[tokio::test]
async fn simultaneous_likes_by_different_users_both_survive() -> Result<()> {
    let Some(server) = common::server_if_configured().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let (alice_email, alice_pw, alice) = common::register_user(&client, &server.base_url).await?;
    let (bob_email, bob_pw, bob) = common::register_user(&client, &server.base_url).await?;
    let alice_id = alice["id"].as_str().unwrap().to_string();
    let bob_id = bob["id"].as_str().unwrap().to_string();
    let alice_token =
        common::login_user(&client, &server.base_url, &alice_email, &alice_pw).await?;
    let bob_token = common::login_user(&client, &server.base_url, &bob_email, &bob_pw).await?;

    // Alice creates a post
    let form = reqwest::multipart::Form::new().text("description", "race me");
    let res = client
        .post(format!("{}/posts", server.base_url))
        .bearer_auth(&alice_token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let post_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["userId"] == serde_json::json!(alice_id))
        .and_then(|p| p["id"].as_str())
        .unwrap()
        .to_string();

    // Both users toggle their like at the same time; the flips land on
    // different map keys, so neither may clobber the other
    let like_url = format!("{}/posts/{}/like", server.base_url, post_id);
    let (a, b) = tokio::join!(
        client.patch(&like_url).bearer_auth(&alice_token).send(),
        client.patch(&like_url).bearer_auth(&bob_token).send()
    );
    assert_eq!(a?.status(), StatusCode::OK);
    assert_eq!(b?.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/posts/{}/posts", server.base_url, alice_id))
        .bearer_auth(&alice_token)
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let post = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == serde_json::json!(post_id))
        .expect("post should still exist");
    assert_eq!(post["likes"][&alice_id], serde_json::json!(true));
    assert_eq!(post["likes"][&bob_id], serde_json::json!(true));

    Ok(())
}

#[tokio::test]
async fn friend_toggle_is_mutual_and_reversible() -> Result<()> {
    let Some(server) = common::server_if_configured().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let (email, password, alice) = common::register_user(&client, &server.base_url).await?;
    let (_, _, bob) = common::register_user(&client, &server.base_url).await?;
    let alice_id = alice["id"].as_str().unwrap();
    let bob_id = bob["id"].as_str().unwrap();
    let token = common::login_user(&client, &server.base_url, &email, &password).await?;

    let toggle_url = format!("{}/users/{}/{}", server.base_url, alice_id, bob_id);

    // First toggle befriends both sides
    let res = client.patch(&toggle_url).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let friends = body["data"].as_array().unwrap();
    assert!(friends.iter().any(|f| f["id"] == serde_json::json!(bob_id)));

    let res = client
        .get(format!("{}/users/{}/friends", server.base_url, bob_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let bobs_friends = body["data"].as_array().unwrap();
    assert!(bobs_friends.iter().any(|f| f["id"] == serde_json::json!(alice_id)));

    // Second toggle removes both sides
    let res = client.patch(&toggle_url).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["data"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn missing_post_returns_not_found() -> Result<()> {
    let Some(server) = common::server_if_configured().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let (email, password, _) = common::register_user(&client, &server.base_url).await?;
    let token = common::login_user(&client, &server.base_url, &email, &password).await?;

    let res = client
        .patch(format!(
            "{}/posts/00000000-0000-0000-0000-000000000000/like",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
