use ledge_swarm::error::AppResult;

fn main() -> AppResult<()> {
    ledge_swarm::entry::run()
}
