//! Static starter sources.
//!
//! Scaffold files are skipped when a preset generator produced the
//! application. Framework configuration that carries the port is written
//! as a standard file so it always matches the allocated port.

use crate::{
    application::composer::{DB_PASSWORD, DB_PORT, DB_USER, render},
    domain::{ArtifactBundle, ArtifactRole, JavaFramework, LanguageProfile, ResolvedContext},
    error::KindleResult,
};

const NODE_MAIN_TS: &str = r#"import { createServer } from "node:http";

const port = Number(process.env.PORT ?? {{PORT}});

createServer((_req, res) => {
  res.writeHead(200, { "content-type": "application/json" });
  res.end(JSON.stringify({ service: "{{SLUG}}", status: "ok" }));
}).listen(port, () => {
  console.log(`{{SLUG}} listening on http://localhost:${port}`);
});
"#;

const NODE_MAIN_JS: &str = r#"import { createServer } from "node:http";

const port = Number(process.env.PORT ?? {{PORT}});

createServer((req, res) => {
  res.writeHead(200, { "content-type": "application/json" });
  res.end(JSON.stringify({ service: "{{SLUG}}", status: "ok" }));
}).listen(port, () => {
  console.log(`{{SLUG}} listening on http://localhost:${port}`);
});
"#;

const PYTHON_MAIN: &str = r#"import json
import os
from http.server import BaseHTTPRequestHandler, HTTPServer

PORT = int(os.environ.get("PORT", "{{PORT}}"))


class Handler(BaseHTTPRequestHandler):
    def do_GET(self):
        body = json.dumps({"service": "{{SLUG}}", "status": "ok"}).encode()
        self.send_response(200)
        self.send_header("content-type", "application/json")
        self.end_headers()
        self.wfile.write(body)


def main():
    print(f"{{SLUG}} listening on http://localhost:{PORT}")
    HTTPServer(("0.0.0.0", PORT), Handler).serve_forever()


if __name__ == "__main__":
    main()
"#;

const PYTHON_TEST: &str = r#"from {{MODULE}}.__main__ import PORT


def test_port_is_configured():
    assert PORT > 0
"#;

const SPRING_MAIN: &str = r#"package {{PACKAGE}};

import java.util.Map;

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;
import org.springframework.web.bind.annotation.GetMapping;
import org.springframework.web.bind.annotation.RestController;

@SpringBootApplication
@RestController
public class {{CLASS}}Application {

    public static void main(String[] args) {
        SpringApplication.run({{CLASS}}Application.class, args);
    }

    @GetMapping("/")
    public Map<String, String> status() {
        return Map.of("service", "{{SLUG}}", "status", "ok");
    }
}
"#;

const QUARKUS_RESOURCE: &str = r#"package {{PACKAGE}};

import java.util.Map;

import jakarta.ws.rs.GET;
import jakarta.ws.rs.Path;
import jakarta.ws.rs.Produces;
import jakarta.ws.rs.core.MediaType;

@Path("/")
public class {{CLASS}}Resource {

    @GET
    @Produces(MediaType.APPLICATION_JSON)
    public Map<String, String> status() {
        return Map.of("service", "{{SLUG}}", "status", "ok");
    }
}
"#;

const JAVA_MAIN: &str = r#"package {{PACKAGE}};

import java.io.IOException;
import java.io.OutputStream;
import java.net.InetSocketAddress;
import java.nio.charset.StandardCharsets;

import com.sun.net.httpserver.HttpServer;

public class {{CLASS}}Application {

    public static void main(String[] args) throws IOException {
        int port = Integer.parseInt(System.getenv().getOrDefault("PORT", "{{PORT}}"));
        HttpServer server = HttpServer.create(new InetSocketAddress(port), 0);
        server.createContext("/", exchange -> {
            byte[] body = "{\"service\":\"{{SLUG}}\",\"status\":\"ok\"}".getBytes(StandardCharsets.UTF_8);
            exchange.getResponseHeaders().add("content-type", "application/json");
            exchange.sendResponseHeaders(200, body.length);
            try (OutputStream out = exchange.getResponseBody()) {
                out.write(body);
            }
        });
        server.start();
        System.out.println("{{SLUG}} listening on http://localhost:" + port);
    }
}
"#;

const RUST_MAIN: &str = r##"use std::io::{Read, Write};
use std::net::TcpListener;

fn main() -> std::io::Result<()> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "{{PORT}}".to_string());
    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))?;
    println!("{{SLUG}} listening on http://localhost:{port}");

    for stream in listener.incoming() {
        let mut stream = stream?;
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request)?;
        let body = r#"{"service":"{{SLUG}}","status":"ok"}"#;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
            body.len()
        )?;
    }
    Ok(())
}
"##;

const GO_MAIN: &str = r#"package main

import (
	"encoding/json"
	"log"
	"net/http"
	"os"
)

func main() {
	port := os.Getenv("PORT")
	if port == "" {
		port = "{{PORT}}"
	}

	http.HandleFunc("/", func(w http.ResponseWriter, r *http.Request) {
		w.Header().Set("content-type", "application/json")
		json.NewEncoder(w).Encode(map[string]string{"service": "{{SLUG}}", "status": "ok"})
	})

	log.Printf("{{SLUG}} listening on http://localhost:%s", port)
	log.Fatal(http.ListenAndServe(":"+port, nil))
}
"#;

pub(super) fn add(ctx: &ResolvedContext, bundle: &mut ArtifactBundle) -> KindleResult<()> {
    let identity = ctx.identity();
    let port = ctx.ports().application.to_string();
    let vars = [
        ("PORT", port.as_str()),
        ("SLUG", identity.slug.as_str()),
        ("MODULE", identity.snake.as_str()),
        ("PACKAGE", identity.java_package.as_str()),
        ("CLASS", identity.pascal.as_str()),
    ];
    let scaffold = |bundle: &mut ArtifactBundle, path: String, template: &str| {
        bundle.add_file(&path, render(template, &vars), ArtifactRole::Scaffold)
    };

    match ctx.profile() {
        LanguageProfile::TypeScript => scaffold(bundle, ctx.app_path("src/main.ts"), NODE_MAIN_TS)?,
        LanguageProfile::JavaScript => scaffold(bundle, ctx.app_path("src/main.js"), NODE_MAIN_JS)?,
        LanguageProfile::Python => {
            let module = &identity.snake;
            scaffold(
                bundle,
                ctx.app_path(&format!("{module}/__init__.py")),
                "\"\"\"{{SLUG}}.\"\"\"\n",
            )?;
            scaffold(bundle, ctx.app_path(&format!("{module}/__main__.py")), PYTHON_MAIN)?;
            scaffold(bundle, ctx.app_path("tests/test_smoke.py"), PYTHON_TEST)?;
        }
        LanguageProfile::Java(framework) => {
            let source_dir = ctx.app_path(&format!("src/main/java/{}", identity.java_package_path()));
            let (file, template) = match framework {
                Some(JavaFramework::SpringBoot) => ("Application", SPRING_MAIN),
                Some(JavaFramework::Quarkus) => ("Resource", QUARKUS_RESOURCE),
                None => ("Application", JAVA_MAIN),
            };
            scaffold(bundle, format!("{source_dir}/{}{file}.java", identity.pascal), template)?;
            if framework.is_some() {
                bundle.add_file(
                    &ctx.app_path("src/main/resources/application.properties"),
                    application_properties(ctx, framework),
                    ArtifactRole::Standard,
                )?;
            }
        }
        LanguageProfile::Rust => scaffold(bundle, ctx.app_path("src/main.rs"), RUST_MAIN)?,
        LanguageProfile::Go => scaffold(bundle, ctx.app_path("main.go"), GO_MAIN)?,
    }
    Ok(())
}

/// Framework properties; the port falls back to the allocated one when
/// `PORT` is unset.
fn application_properties(ctx: &ResolvedContext, framework: Option<JavaFramework>) -> String {
    let port = ctx.ports().application;
    let slug = ctx.slug();
    let database = &ctx.identity().snake;
    let jdbc_url =
        format!("jdbc:postgresql://${{POSTGRES_HOST:localhost}}:{DB_PORT}/${{POSTGRES_DB:{database}}}");

    match framework {
        Some(JavaFramework::Quarkus) => {
            let mut text =
                format!("quarkus.http.port=${{PORT:{port}}}\nquarkus.application.name={slug}\n");
            if ctx.config().database() {
                text.push_str(&format!(
                    "quarkus.datasource.db-kind=postgresql\nquarkus.datasource.jdbc.url={jdbc_url}\nquarkus.datasource.username=${{POSTGRES_USER:{DB_USER}}}\nquarkus.datasource.password=${{POSTGRES_PASSWORD:{DB_PASSWORD}}}\n"
                ));
            }
            text
        }
        _ => {
            let mut text =
                format!("server.port=${{PORT:{port}}}\nspring.application.name={slug}\n");
            if ctx.config().database() {
                text.push_str(&format!(
                    "spring.datasource.url={jdbc_url}\nspring.datasource.username=${{POSTGRES_USER:{DB_USER}}}\nspring.datasource.password=${{POSTGRES_PASSWORD:{DB_PASSWORD}}}\n"
                ));
            }
            text
        }
    }
}
