//! CLI command definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pushlink")]
#[command(about = "Channel auth and endpoint tool for Pusher-protocol apps", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// App key
    #[arg(long, env = "PUSHER_APP_KEY", global = true)]
    pub key: Option<String>,

    /// App secret used to sign channel subscriptions
    #[arg(long, env = "PUSHER_APP_SECRET", global = true, hide_env_values = true)]
    pub secret: Option<String>,

    /// Cluster the app lives on (default: mt1)
    #[arg(long, env = "PUSHER_CLUSTER", global = true)]
    pub cluster: Option<String>,

    /// Connect over TLS: true/false/1/0/yes/no (default: true)
    #[arg(long, env = "PUSHER_ENCRYPTED", global = true)]
    pub encrypted: Option<String>,

    /// Connect without TLS, overriding --encrypted
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Host override for self-hosted servers
    #[arg(long, env = "PUSHER_HOST", global = true)]
    pub host: Option<String>,
}

impl Cli {
    /// Value for a `PUSHER_*` config variable, as resolved by flags and env
    ///
    /// Empty values count as unset.
    pub fn lookup(&self, name: &str) -> Option<String> {
        use pushlink::config::{ENV_APP_KEY, ENV_APP_SECRET, ENV_CLUSTER, ENV_ENCRYPTED, ENV_HOST};

        let value = match name {
            ENV_APP_KEY => self.key.as_ref(),
            ENV_APP_SECRET => self.secret.as_ref(),
            ENV_CLUSTER => self.cluster.as_ref(),
            ENV_ENCRYPTED => self.encrypted.as_ref(),
            ENV_HOST => self.host.as_ref(),
            _ => None,
        };
        value.filter(|v| !v.is_empty()).cloned()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign a channel subscription
    ///
    /// Examples:
    ///   pushlink auth --socket-id 123.456 --channel private-orders
    ///   pushlink auth --socket-id 123.456 --channel presence-chat --data '{"user_id":42}'
    Auth {
        /// Socket id assigned by the server on connect
        #[arg(long)]
        socket_id: String,

        /// Channel to subscribe to
        #[arg(long)]
        channel: String,

        /// Member data as a JSON object (required for presence channels)
        #[arg(long)]
        data: Option<String>,
    },

    /// Print the endpoint URL for the app
    Url,
}
