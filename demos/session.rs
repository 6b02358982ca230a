use grid_util::point::Point;
use terrain_pathfinding::{Session, SessionError, SessionForm};

// Plays a full game on a seeded 10x10 map: the first two primary commands set the source and
// the destination, the next ones place obstacles. Then an attraction and a repulsion zone are
// placed and the three paths are printed.

fn main() {
    let form = SessionForm {
        rows: "10".to_owned(),
        cols: "10".to_owned(),
        ..SessionForm::default()
    };
    let mut config = match form.submit() {
        Ok(config) => config,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };
    config.seed = Some(42);
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };

    println!("{}", session.instructions());
    session.primary(Point::new(0, 0));
    println!("{}", session.instructions());
    session.primary(Point::new(9, 9));
    println!("{}", session.instructions());
    for x in 2..7 {
        session.primary(Point::new(x, 4));
    }
    println!("{}", session.instructions());
    session.secondary(Point::new(8, 4));
    session.tertiary(Point::new(1, 4));
    println!("{}", session.grid());

    match session.find_path() {
        Ok(report) => {
            for result in report.results() {
                println!("{}", result.text);
            }
        }
        Err(SessionError::NoPath(err)) => {
            println!("{}. Play again?", err);
            match session.restart() {
                Ok(session) => println!("{}", session.instructions()),
                Err(err) => println!("{}", err),
            }
        }
        Err(err) => println!("{}", err),
    }
}
