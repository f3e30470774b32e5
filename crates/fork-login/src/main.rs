use clap::Parser;

use fork_login::LoginClient;

#[derive(Debug, Parser)]
#[command(name = "fork-login", about = "Sign in to a fork-back server")]
struct Args {
	/// Account login (email address).
	login: String,

	/// Account password; prefer the environment variable over the flag.
	#[arg(long, env = "FORK_PASSWORD")]
	password: String,

	/// Server root URL.
	#[arg(long, env = "FORK_SERVER", default_value = "http://127.0.0.1:5000")]
	server: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();
	let client = LoginClient::new(&args.server);

	let session = client.login(&args.login, &args.password).await?;
	let account = client.me(&session.access_token).await?;

	println!(
		"signed in as {} {} <{}> ({:?})",
		account.first_name, account.last_name, account.login, account.role
	);
	println!("token valid until {}", session.access_valid_to);
	println!("{}", session.access_token);

	Ok(())
}
